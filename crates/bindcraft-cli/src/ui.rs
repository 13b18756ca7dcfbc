use bindcraft::engine::events::Event;
use bindcraft::models::design::DesignResult;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

#[derive(Debug)]
pub enum UiEvent {
    /// An event forwarded from the pipeline's run controller.
    Pipeline(Event),
    /// A message from the CLI itself (e.g. stop handling, export notices).
    Notice(String),
}

/// Renders the pipeline event stream on the terminal.
///
/// Runs as its own task and only consumes events; it never calls back into
/// the controller, so nothing on the UI side can block the simulation worker.
pub struct UiManager {
    mp: Arc<MultiProgress>,
    bar: ProgressBar,
    results: Vec<DesignResult>,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));

        let bar = mp.add(ProgressBar::new(100).with_style(Self::bar_style()));
        bar.set_position(0);

        let manager = Self {
            mp,
            bar,
            results: Vec::new(),
            event_receiver,
            shutdown_receiver,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        self.bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Notice(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Pipeline(event) => self.handle_pipeline_event(event),
        }
    }

    fn handle_pipeline_event(&mut self, event: Event) {
        match event {
            Event::Log(line) => {
                self.mp.println(line).ok();
            }
            Event::Progress(percent) => {
                self.bar.set_position(u64::from(percent).min(100));
            }
            Event::DesignAccepted(design) => {
                self.mp
                    .println(format!(
                        "★ Accepted {} (pLDDT {:.1}, dG {:.2} kcal/mol)",
                        design.name, design.plddt, design.dg
                    ))
                    .ok();
                self.results.push(design);
            }
            Event::RunFinished => {
                self.bar.finish();
                self.print_results_table();
            }
        }
    }

    fn print_results_table(&self) {
        if self.results.is_empty() {
            self.mp.println("No designs were accepted.").ok();
            return;
        }

        self.mp
            .println(format!(
                "{:<22} {:>7} {:>6} {:>7} {:>11} {:>8} {:>7} {:>9}",
                "Design Name", "pLDDT", "PAE", "dSASA", "Shape Comp", "dG", "Length", "Status"
            ))
            .ok();
        for design in &self.results {
            self.mp
                .println(format!(
                    "{:<22} {:>7.1} {:>6.1} {:>7.0} {:>11.1} {:>8.2} {:>7} {:>9}",
                    design.name,
                    design.plddt,
                    design.pae,
                    design.dsasa,
                    design.shape_comp,
                    design.dg,
                    design.length,
                    design.status.to_string()
                ))
                .ok();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("Trajectories [{bar:40.cyan/blue}] {pos:>3}%")
            .expect("Invalid template")
            .progress_chars("━╸ ")
    }
}
