use std::time::Duration;

/// Delay schedule for the simulated pipeline stages.
///
/// No work happens during these pauses; they exist so a consuming front-end
/// sees the rhythm a real pipeline would have. They are also the suspension
/// points of a run: total duration scales with the trajectory count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After the configuration banner.
    pub banner: Duration,
    /// After each model-setup line during initialization.
    pub init_stage: Duration,
    /// Before the backbone-generation stage of a trajectory.
    pub backbone: Duration,
    /// Before the sequence-design stage.
    pub sequence_design: Duration,
    /// Before the structure-prediction stage.
    pub prediction: Duration,
    /// Before the filter draw.
    pub filtering: Duration,
    /// After a trajectory's progress update.
    pub cooldown: Duration,
}

impl Pacing {
    /// The pacing a live demo shows.
    pub fn demo() -> Self {
        Self {
            banner: Duration::from_millis(1000),
            init_stage: Duration::from_millis(500),
            backbone: Duration::from_millis(300),
            sequence_design: Duration::from_millis(200),
            prediction: Duration::from_millis(300),
            filtering: Duration::from_millis(200),
            cooldown: Duration::from_millis(100),
        }
    }

    /// Zero delays everywhere, for tests and `--fast` runs.
    pub fn instant() -> Self {
        Self {
            banner: Duration::ZERO,
            init_stage: Duration::ZERO,
            backbone: Duration::ZERO,
            sequence_design: Duration::ZERO,
            prediction: Duration::ZERO,
            filtering: Duration::ZERO,
            cooldown: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::demo()
    }
}
