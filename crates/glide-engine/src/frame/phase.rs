use std::fmt;
use std::str::FromStr;

use crate::error::ClockError;

/// Named point in the host's per-frame pipeline.
///
/// What each phase means is up to the host; subscribers only rely on every
/// phase firing at most once per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FramePhase {
    /// Before physics/simulation steps.
    PreSimulation,
    /// After simulation, once per simulated frame.
    Simulation,
    /// Right before the frame is rendered.
    PreRender,
    /// After the frame has been submitted.
    PostRender,
}

impl FramePhase {
    /// Phases in the order a host fires them within one frame.
    pub const ALL: [FramePhase; 4] = [
        FramePhase::PreSimulation,
        FramePhase::Simulation,
        FramePhase::PreRender,
        FramePhase::PostRender,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreSimulation => "pre_simulation",
            Self::Simulation => "simulation",
            Self::PreRender => "pre_render",
            Self::PostRender => "post_render",
        }
    }
}

impl fmt::Display for FramePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FramePhase {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClockError::UnknownPhase(s.to_string()))
    }
}
