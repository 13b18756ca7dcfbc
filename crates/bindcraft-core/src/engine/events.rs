use crate::models::design::DesignResult;

/// One item in the ordered stream a pipeline run emits.
///
/// Events are immutable, delivered exactly once, and never reordered:
/// a `DesignAccepted` is only meaningful after the log lines describing the
/// trajectory that produced it, and `RunFinished` is always the last event
/// of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A user-facing pipeline log line.
    Log(String),
    /// Overall completion percentage, `0..=100`, non-decreasing within a run.
    Progress(u8),
    /// A trajectory passed the simulated filters and produced a design.
    DesignAccepted(DesignResult),
    /// Terminal event. Emitted exactly once per run, on every exit path.
    RunFinished,
}

pub type EventCallback<'a> = Box<dyn Fn(Event) + Send + Sync + 'a>;

/// The seam the simulator emits through.
///
/// A reporter without a callback swallows events, which keeps the simulator
/// callable from contexts that only care about its return value.
#[derive(Default)]
pub struct EventReporter<'a> {
    callback: Option<EventCallback<'a>>,
}

impl<'a> EventReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: EventCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Event) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn log(&self, line: impl Into<String>) {
        self.report(Event::Log(line.into()));
    }

    pub fn progress(&self, percent: u8) {
        self.report(Event::Progress(percent));
    }
}
