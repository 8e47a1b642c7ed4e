use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use glide_engine::frame::FramePhase;

/// How the studio runs clock callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DispatchMode {
    /// Queued on the frame thread, drained once per frame.
    Queued,
    /// On a tokio blocking pool.
    Tokio,
}

/// Studio run configuration.
///
/// Every field can be overridden from the environment:
/// `GLIDE_PHASE`, `GLIDE_FPS`, `GLIDE_SECONDS`, `GLIDE_DISPATCH`.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub phase: FramePhase,
    /// Sleep between frames, derived from `GLIDE_FPS`.
    pub frame_interval: Duration,
    /// Upper bound on the demo run.
    pub run_for: Duration,
    pub dispatch: DispatchMode,
}

const DEFAULT_FPS: f64 = 60.0;
const DEFAULT_SECONDS: f64 = 4.0;

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            phase: FramePhase::PreRender,
            frame_interval: Duration::from_secs_f64(1.0 / DEFAULT_FPS),
            run_for: Duration::from_secs_f64(DEFAULT_SECONDS),
            dispatch: DispatchMode::Queued,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let mut fps = DEFAULT_FPS;
        let mut seconds = DEFAULT_SECONDS;

        if let Some(phase) = lookup("GLIDE_PHASE") {
            config.phase = phase.parse().context("GLIDE_PHASE")?;
        }
        if let Some(raw) = lookup("GLIDE_FPS") {
            fps = raw
                .trim()
                .parse()
                .with_context(|| format!("GLIDE_FPS is not a number: `{raw}`"))?;
        }
        if let Some(raw) = lookup("GLIDE_SECONDS") {
            seconds = raw
                .trim()
                .parse()
                .with_context(|| format!("GLIDE_SECONDS is not a number: `{raw}`"))?;
        }
        if let Some(mode) = lookup("GLIDE_DISPATCH") {
            config.dispatch = match mode.trim().to_ascii_lowercase().as_str() {
                "queued" => DispatchMode::Queued,
                "tokio" => DispatchMode::Tokio,
                other => bail!("GLIDE_DISPATCH must be `queued` or `tokio`, got `{other}`"),
            };
        }

        ensure!(fps.is_finite() && fps > 0.0, "GLIDE_FPS must be positive, got {fps}");
        config.frame_interval = Duration::try_from_secs_f64(1.0 / fps)
            .with_context(|| format!("GLIDE_FPS {fps} gives an unrepresentable frame interval"))?;
        config.run_for = Duration::try_from_secs_f64(seconds)
            .with_context(|| format!("GLIDE_SECONDS must be a non-negative duration, got {seconds}"))?;

        Ok(config)
    }
}
