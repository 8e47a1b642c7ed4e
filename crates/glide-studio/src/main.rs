mod config;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use glide_engine::clock::{ClockHandle, ClockSpec, FrameClock};
use glide_engine::coords::{Color, Vec2};
use glide_engine::dispatch::{Dispatcher, QueuedDispatcher, TokioDispatcher};
use glide_engine::frame::{FramePhase, FrameSignals};
use glide_engine::interp::{cubic_curve, linear, quadratic_curve};
use glide_engine::logging::{LoggingConfig, init_logging};
use glide_engine::time::{FrameTimer, MonotonicTime, TimeSource};

use config::{DispatchMode, StudioConfig};

/// Pulse is released by the host after this long.
const PULSE_CUTOFF: Duration = Duration::from_millis(750);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let config = StudioConfig::from_env().context("invalid studio configuration")?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║           GLIDE STUDIO v0.1            ║");
    println!("  ║     frame clocks  ·  bezier curves     ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();
    log::info!(
        "phase={} frame_interval={:?} run_for={:?} dispatch={:?}",
        config.phase, config.frame_interval, config.run_for, config.dispatch
    );

    match config.dispatch {
        DispatchMode::Queued => {
            let dispatcher = QueuedDispatcher::new();
            let drain = dispatcher.clone();
            run(&config, dispatcher, move || {
                let report = drain.run_pending();
                if !report.is_clean() {
                    log::warn!("{} callback(s) failed this frame", report.failures.len());
                }
            })
        }
        DispatchMode::Tokio => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .build()
                .context("failed to build tokio runtime")?;
            let result = run(&config, TokioDispatcher::new(rt.handle().clone()), || {});
            rt.shutdown_timeout(Duration::from_secs(1));
            result
        }
    }
}

/// Starts the demo clocks and drives every frame phase until they are done.
fn run(
    config: &StudioConfig,
    dispatcher: impl Dispatcher + 'static,
    mut drain: impl FnMut(),
) -> Result<()> {
    let signals = FrameSignals::new();
    let clock = FrameClock::new(signals.clone(), dispatcher);

    let halfway = Arc::new(AtomicBool::new(false));
    let slide = start_slide(&clock, config.phase, Arc::clone(&halfway));
    let fade = start_fade(&clock, config.phase, halfway);
    let pulse = start_pulse(&clock, config.phase);

    let time = MonotonicTime::new();
    let mut timer = FrameTimer::new();

    while time.now() < config.run_for && [&slide, &fade, &pulse].iter().any(|h| h.is_live()) {
        let frame = timer.tick();
        for phase in FramePhase::ALL {
            let report = signals.fire(phase, frame.dt);
            if !report.is_clean() {
                log::warn!("{} {phase} tick(s) failed this frame", report.failures.len());
            }
        }
        drain();

        if pulse.is_live() && time.now() >= PULSE_CUTOFF {
            pulse.release();
        }
        std::thread::sleep(config.frame_interval);
    }
    drain();

    for (name, handle) in [("slide", &slide), ("fade", &fade), ("pulse", &pulse)] {
        match handle.termination() {
            Some(reason) => log::info!("{name}: {reason:?}"),
            None => {
                log::warn!("{name}: still running after {:?}, releasing", config.run_for);
                handle.release();
            }
        }
    }

    Ok(())
}

/// Moves a point along a cubic path over 1.5 s.
fn start_slide(clock: &FrameClock, phase: FramePhase, halfway: Arc<AtomicBool>) -> ClockHandle {
    let (p0, p1, p2, p3) = (
        Vec2::new(0.0, 0.0),
        Vec2::new(40.0, 120.0),
        Vec2::new(160.0, -40.0),
        Vec2::new(200.0, 80.0),
    );
    clock.start(
        ClockSpec::new(phase, 1.5, move |p| {
            let pos = cubic_curve(p0, p1, p2, p3, p.alpha);
            println!("  slide {} ({:6.1}, {:6.1})", bar(p.alpha), pos.x, pos.y);
            if p.alpha >= 0.5 {
                halfway.store(true, Ordering::Relaxed);
            }
        })
        .on_complete(|| log::info!("slide finished")),
    )
}

/// Fades between two colors; cancelled once the slide is halfway.
fn start_fade(clock: &FrameClock, phase: FramePhase, halfway: Arc<AtomicBool>) -> ClockHandle {
    let from = Color::from_srgb_u8(255, 96, 32, 255);
    let to = Color::from_srgb_u8(32, 96, 255, 128);
    clock.start(
        ClockSpec::new(phase, 2.5, move |p| {
            let (r, g, b, a) = linear(from, to, p.alpha).clamped().to_straight();
            println!("  fade  {} rgba({r:.2}, {g:.2}, {b:.2}, {a:.2})", bar(p.alpha));
        })
        .on_complete(|| log::info!("fade stopped"))
        .cancel_when(move || halfway.load(Ordering::Relaxed)),
    )
}

/// Bounces a scalar; released by the host loop before it can finish.
fn start_pulse(clock: &FrameClock, phase: FramePhase) -> ClockHandle {
    clock.start(
        ClockSpec::new(phase, 2.0, |p| {
            let scale = quadratic_curve(1.0, 1.6, 1.0, p.alpha);
            println!("  pulse {} x{scale:.3}", bar(p.alpha));
        })
        .on_complete(|| log::info!("pulse finished")),
    )
}

fn bar(alpha: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (alpha.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
