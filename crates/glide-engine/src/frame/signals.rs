use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{FrameHandler, FramePhase, FrameSource, Subscription};
use crate::error::ClockError;

type SharedHandler = Rc<RefCell<FrameHandler>>;

struct Slot {
    id: u64,
    subscription: Subscription,
    handler: SharedHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    phases: HashMap<FramePhase, Vec<Slot>>,
}

impl Registry {
    fn remove(&mut self, phase: FramePhase, id: u64) {
        if let Some(slots) = self.phases.get_mut(&phase) {
            slots.retain(|slot| slot.id != id);
        }
    }
}

/// Outcome of firing one phase.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Handlers that were invoked.
    pub delivered: usize,
    /// Errors returned by handlers, in delivery order.
    pub failures: Vec<ClockError>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// In-process frame source driven by the host loop.
///
/// The host calls [`fire`](Self::fire) once per frame per phase. Clones share
/// the same registry, so the loop can keep one handle while clocks hold others.
///
/// Single-threaded: handlers run synchronously on the thread that fires.
#[derive(Clone, Default)]
pub struct FrameSignals {
    registry: Rc<RefCell<Registry>>,
}

impl FrameSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live handlers subscribed to `phase`.
    pub fn subscriber_count(&self, phase: FramePhase) -> usize {
        self.registry
            .borrow()
            .phases
            .get(&phase)
            .map_or(0, |slots| slots.len())
    }

    /// Delivers one frame of `phase` with `delta` seconds to every subscriber.
    ///
    /// Subscribers are snapshotted first. A handler may subscribe or release
    /// (itself or others) while being delivered to; subscriptions released
    /// mid-delivery are skipped, new ones first fire on the next frame.
    pub fn fire(&self, phase: FramePhase, delta: f64) -> FrameReport {
        let snapshot: Vec<(Subscription, SharedHandler)> = self
            .registry
            .borrow()
            .phases
            .get(&phase)
            .map(|slots| {
                slots
                    .iter()
                    .map(|slot| (slot.subscription.clone(), Rc::clone(&slot.handler)))
                    .collect()
            })
            .unwrap_or_default();

        let mut report = FrameReport::default();
        for (subscription, handler) in snapshot {
            if !subscription.is_live() {
                continue;
            }
            let Ok(mut guard) = handler.try_borrow_mut() else {
                log::warn!("skipping re-entrant {phase} delivery");
                continue;
            };
            let handler: &mut FrameHandler = &mut guard;
            report.delivered += 1;
            if let Err(err) = handler(delta) {
                log::error!("{phase} handler failed: {err}");
                report.failures.push(err);
            }
        }
        report
    }
}

impl FrameSource for FrameSignals {
    fn subscribe(&self, phase: FramePhase, handler: FrameHandler) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;

        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        let subscription = Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().remove(phase, id);
            }
        });

        registry.phases.entry(phase).or_default().push(Slot {
            id,
            subscription: subscription.clone(),
            handler: Rc::new(RefCell::new(handler)),
        });
        log::trace!("subscribed handler {id} to {phase}");

        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, FrameHandler) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let handler: FrameHandler = Box::new(move |_dt| {
            h.set(h.get() + 1);
            Ok(())
        });
        (hits, handler)
    }

    // ── delivery ──────────────────────────────────────────────────────────

    #[test]
    fn fire_reaches_only_the_named_phase() {
        let signals = FrameSignals::new();
        let (sim, h1) = counter();
        let (render, h2) = counter();
        let _a = signals.subscribe(FramePhase::Simulation, h1);
        let _b = signals.subscribe(FramePhase::PreRender, h2);

        let report = signals.fire(FramePhase::Simulation, 0.016);
        assert_eq!(report.delivered, 1);
        assert_eq!(sim.get(), 1);
        assert_eq!(render.get(), 0);
    }

    #[test]
    fn handler_receives_delta() {
        let signals = FrameSignals::new();
        let seen = Rc::new(Cell::new(0.0));
        let s = Rc::clone(&seen);
        let _sub = signals.subscribe(
            FramePhase::PreRender,
            Box::new(move |dt| {
                s.set(dt);
                Ok(())
            }),
        );
        signals.fire(FramePhase::PreRender, 0.125);
        assert_eq!(seen.get(), 0.125);
    }

    #[test]
    fn failures_are_reported_without_detaching() {
        let signals = FrameSignals::new();
        let sub = signals.subscribe(
            FramePhase::Simulation,
            Box::new(|_| Err(ClockError::UnknownPhase("x".into()))),
        );
        let report = signals.fire(FramePhase::Simulation, 0.0);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_clean());
        assert!(sub.is_live());
        assert_eq!(signals.subscriber_count(FramePhase::Simulation), 1);
    }

    // ── release ───────────────────────────────────────────────────────────

    #[test]
    fn release_detaches_handler() {
        let signals = FrameSignals::new();
        let (hits, h) = counter();
        let sub = signals.subscribe(FramePhase::Simulation, h);
        sub.release();
        sub.release();

        assert_eq!(signals.subscriber_count(FramePhase::Simulation), 0);
        assert_eq!(signals.fire(FramePhase::Simulation, 0.0).delivered, 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn handler_may_release_itself() {
        let signals = FrameSignals::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let hits = Rc::new(Cell::new(0));

        let (s, h) = (Rc::clone(&slot), Rc::clone(&hits));
        let sub = signals.subscribe(
            FramePhase::Simulation,
            Box::new(move |_| {
                h.set(h.get() + 1);
                if let Some(me) = s.borrow().as_ref() {
                    me.release();
                }
                Ok(())
            }),
        );
        *slot.borrow_mut() = Some(sub);

        signals.fire(FramePhase::Simulation, 0.0);
        signals.fire(FramePhase::Simulation, 0.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(signals.subscriber_count(FramePhase::Simulation), 0);
    }

    #[test]
    fn release_during_delivery_skips_later_snapshot_entries() {
        let signals = FrameSignals::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let v = Rc::clone(&victim);
        let _killer = signals.subscribe(
            FramePhase::PreRender,
            Box::new(move |_| {
                if let Some(sub) = v.borrow().as_ref() {
                    sub.release();
                }
                Ok(())
            }),
        );
        let (hits, h) = counter();
        *victim.borrow_mut() = Some(signals.subscribe(FramePhase::PreRender, h));

        let report = signals.fire(FramePhase::PreRender, 0.0);
        assert_eq!(report.delivered, 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscribe_during_delivery_fires_next_frame() {
        let signals = FrameSignals::new();
        let (late_hits, late) = counter();
        let mut late = Some(late);
        let inner = signals.clone();
        let keep: Rc<RefCell<Vec<Subscription>>> = Rc::default();
        let k = Rc::clone(&keep);

        let _first = signals.subscribe(
            FramePhase::Simulation,
            Box::new(move |_| {
                if let Some(h) = late.take() {
                    k.borrow_mut().push(inner.subscribe(FramePhase::Simulation, h));
                }
                Ok(())
            }),
        );

        assert_eq!(signals.fire(FramePhase::Simulation, 0.0).delivered, 1);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(signals.fire(FramePhase::Simulation, 0.0).delivered, 2);
        assert_eq!(late_hits.get(), 1);
    }
}
