use super::config::RunConfig;
use super::events::{Event, EventReporter};
use super::pacing::Pacing;
use super::sampling::{Sampler, StdSampler};
use crate::workflows::simulate;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, warn};

/// Lifecycle of the controller's current (or most recent) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    StopRequested,
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::StopRequested => "stopping",
            RunState::Finished => "finished",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    /// `start` was called while the previous run is still executing.
    #[error("cannot start a run while the previous one is {0}")]
    InvalidState(RunState),

    #[error("failed to spawn the simulation worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Shared cancellation flag between a controller and its worker.
///
/// Cancellation is cooperative: setting the flag never interrupts a stage in
/// flight, the simulator observes it at trajectory boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct WorkerHandle {
    join: Option<JoinHandle<()>>,
    cancel: CancelToken,
    finished: Arc<AtomicBool>,
}

/// Owns the lifecycle of one simulated pipeline execution at a time.
///
/// `start` hands back the ordered event channel for that run; `stop` requests
/// cancellation and waits for the worker to wind down. A finished run is
/// implicitly idle: the next `start` reaps the old worker and begins a new one.
pub struct RunController {
    pacing: Pacing,
    worker: Option<WorkerHandle>,
}

impl RunController {
    pub fn new() -> Self {
        Self::with_pacing(Pacing::default())
    }

    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            worker: None,
        }
    }

    pub fn state(&self) -> RunState {
        match &self.worker {
            None => RunState::Idle,
            Some(worker) if worker.finished.load(Ordering::SeqCst) => RunState::Finished,
            Some(worker) if worker.cancel.is_cancelled() => RunState::StopRequested,
            Some(_) => RunState::Running,
        }
    }

    /// Starts a run with entropy-seeded randomness.
    pub fn start(&mut self, config: RunConfig) -> Result<Receiver<Event>, ControllerError> {
        self.start_with_sampler(config, Box::new(StdSampler::from_entropy()))
    }

    /// Starts a run with a caller-provided outcome source.
    ///
    /// This is the seam for seeded demo runs and for tests that script exact
    /// pass/fail sequences.
    pub fn start_with_sampler(
        &mut self,
        config: RunConfig,
        mut sampler: Box<dyn Sampler>,
    ) -> Result<Receiver<Event>, ControllerError> {
        match self.state() {
            state @ (RunState::Running | RunState::StopRequested) => {
                return Err(ControllerError::InvalidState(state));
            }
            RunState::Idle | RunState::Finished => {}
        }
        self.reap();

        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();
        let finished = Arc::new(AtomicBool::new(false));
        let pacing = self.pacing;

        let worker_cancel = cancel.clone();
        let worker_finished = Arc::clone(&finished);
        let join = thread::Builder::new()
            .name("bindcraft-sim".to_string())
            .spawn(move || {
                // A dropped receiver is not an error: the run keeps going and
                // the remaining events are discarded.
                let reporter = EventReporter::with_callback(Box::new(move |event| {
                    let _ = sender.send(event);
                }));

                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    simulate::run(&config, &reporter, &worker_cancel, sampler.as_mut(), &pacing)
                }));
                match outcome {
                    Ok(Ok(summary)) => debug!(
                        trajectories = summary.trajectories_run,
                        accepted = summary.accepted,
                        cancelled = summary.cancelled,
                        "Simulation worker finished."
                    ),
                    Ok(Err(err)) => reporter.report(Event::Log(format!("[ERROR] {err}"))),
                    Err(_) => reporter.report(Event::Log(
                        "[ERROR] simulation worker panicked; aborting the run".to_string(),
                    )),
                }
                reporter.report(Event::RunFinished);
                worker_finished.store(true, Ordering::SeqCst);
            })?;

        self.worker = Some(WorkerHandle {
            join: Some(join),
            cancel,
            finished,
        });
        Ok(receiver)
    }

    /// Requests cancellation and waits for the worker to exit.
    ///
    /// No-op when idle. Never kills the thread: the simulator observes the
    /// flag at its next trajectory boundary, emits its summary and terminal
    /// event, and returns on its own.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.as_mut() else {
            return;
        };
        worker.cancel.cancel();
        if let Some(join) = worker.join.take() {
            if join.join().is_err() {
                warn!("Simulation worker thread terminated abnormally.");
            }
        }
    }

    fn reap(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            if let Some(join) = worker.join.take() {
                let _ = join.join();
            }
        }
    }
}

impl Default for RunController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RunController {
    // A dropped controller must not leak its worker; at most one simulator
    // may ever execute at a time.
    fn drop(&mut self) {
        self.stop();
    }
}
