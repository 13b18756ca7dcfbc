use crate::engine::config::RunConfig;
use crate::engine::error::SimulationError;
use crate::engine::events::{Event, EventReporter};
use crate::engine::pacing::Pacing;
use crate::engine::runner::CancelToken;
use crate::engine::sampling::Sampler;
use crate::models::design::{DesignResult, DesignStatus};
use std::thread;
use std::time::Duration;
use tracing::{info, instrument};

/// Fraction of trajectories that pass the simulated filter stack.
pub const ACCEPTANCE_RATE: f64 = 0.15;

const RULE_WIDTH: usize = 60;

/// What a finished (or cancelled) run amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub trajectories_run: u32,
    pub accepted: u32,
    pub cancelled: bool,
}

/// Drives one complete simulated pipeline run.
///
/// Emits the full event sequence through `reporter`: configuration banner,
/// initialization block, one block per trajectory, and the terminal summary
/// with a final `Progress(100)`. Cancellation is observed at trajectory
/// boundaries only; a stage already underway always completes.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    config: &RunConfig,
    reporter: &EventReporter,
    cancel: &CancelToken,
    sampler: &mut dyn Sampler,
    pacing: &Pacing,
) -> Result<RunSummary, SimulationError> {
    config.validate()?;
    info!(
        binder = %config.binder_name,
        max_trajectories = config.max_trajectories,
        target_designs = config.target_designs,
        "Starting simulated pipeline run."
    );

    emit_banner(config, reporter);
    pause(pacing.banner);
    emit_initialization(reporter, pacing);

    let mut accepted = 0u32;
    let mut trajectories_run = 0u32;
    let mut cancelled = false;

    for traj in 1..=config.max_trajectories {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        trajectories_run = traj;

        reporter.log(format!(
            "[TRAJ {traj}/{max}] Starting trajectory {traj}...",
            max = config.max_trajectories
        ));

        pause(pacing.backbone);
        reporter.log(format!(
            "[TRAJ {traj}] Running RFdiffusion for backbone generation..."
        ));
        reporter.log("            → Mock: Would use AlphaFold2/RFdiffusion to generate 3D backbone");

        pause(pacing.sequence_design);
        reporter.log(format!(
            "[TRAJ {traj}] Running ProteinMPNN for sequence design..."
        ));
        reporter.log("            → Mock: Would use ProteinMPNN to design optimal sequence");

        pause(pacing.prediction);
        reporter.log(format!(
            "[TRAJ {traj}] Running AlphaFold2 structure prediction..."
        ));
        reporter.log("            → Mock: Would use AlphaFold2 to predict and validate structure");

        pause(pacing.filtering);
        if sampler.draw_pass(ACCEPTANCE_RATE) {
            accepted += 1;
            let design = synthesize_design(config, accepted, sampler);

            reporter.log(format!("[TRAJ {traj}] ✓ PASSED filters!"));
            reporter.log(format!("            → pLDDT: {:.1}", design.plddt));
            reporter.log(format!("            → PAE: {:.1}", design.pae));
            reporter.log(format!("            → dSASA: {:.0}", design.dsasa));
            reporter.log(format!(
                "            → Shape Complementarity: {:.1}",
                design.shape_comp
            ));
            reporter.report(Event::DesignAccepted(design));

            if accepted >= config.target_designs {
                reporter.log("");
                reporter.log(format!(
                    "[SUCCESS] Reached target of {} accepted designs!",
                    config.target_designs
                ));
                break;
            }
        } else {
            reporter.log(format!("[TRAJ {traj}] ✗ Failed filters"));
        }

        reporter.progress(percent_done(traj, config.max_trajectories));
        pause(pacing.cooldown);
    }

    emit_summary(reporter, trajectories_run, accepted, cancelled);
    reporter.progress(100);

    info!(
        trajectories = trajectories_run,
        accepted, cancelled, "Simulated pipeline run complete."
    );
    Ok(RunSummary {
        trajectories_run,
        accepted,
        cancelled,
    })
}

fn emit_banner(config: &RunConfig, reporter: &EventReporter) {
    let rule = "=".repeat(RULE_WIDTH);
    reporter.log(rule.clone());
    reporter.log("BindCraft Pipeline Demo - Mock Execution");
    reporter.log(rule);
    reporter.log("");
    reporter.log("[INFO] This is a DEMO version that simulates the pipeline.");
    reporter.log("[INFO] No actual structure generation will occur.");
    reporter.log("");
    reporter.log("Configuration:");
    reporter.log(format!("  Binder Name: {}", config.binder_name));
    reporter.log(format!("  Target Chains: {}", config.target_chains));
    reporter.log(format!("  Hotspot Residues: {}", config.hotspot_residues));
    reporter.log(format!(
        "  Binder Length: {}-{} aa",
        config.min_length, config.max_length
    ));
    reporter.log(format!("  Advanced Profile: {}", config.advanced_profile));
    reporter.log(format!(
        "  MPNN Redesign: {}",
        enabled_text(config.mpnn_redesign)
    ));
    reporter.log(format!(
        "  Save MPNN FASTA: {}",
        enabled_text(config.mpnn_save_fasta)
    ));
    reporter.log(format!(
        "  Filters: pLDDT ≥ {:.0}, dSASA ≥ {:.0}, SC ≥ {:.0}, PAE ≤ {:.0}",
        config.filters.plddt_min,
        config.filters.dsasa_min,
        config.filters.shape_comp_min,
        config.filters.pae_max
    ));
    reporter.log(format!("  Max Trajectories: {}", config.max_trajectories));
    reporter.log(format!("  Target Accepted: {}", config.target_designs));
    reporter.log("");
}

fn emit_initialization(reporter: &EventReporter, pacing: &Pacing) {
    reporter.log("[INIT] Initializing BindCraft pipeline...");
    reporter.log("[INIT] Loading target structure...");
    pause(pacing.init_stage);
    reporter.log("[INIT] Setting up RFdiffusion model...");
    reporter.log("       → In real version: Use AlphaFold2/RFdiffusion for structure generation");
    pause(pacing.init_stage);
    reporter.log("[INIT] Setting up ProteinMPNN model...");
    reporter.log("       → In real version: Use ProteinMPNN for sequence design");
    pause(pacing.init_stage);
    reporter.log("[INIT] Setting up AlphaFold2 model...");
    reporter.log("       → In real version: Use AlphaFold2 for structure prediction and validation");
    pause(pacing.init_stage);
    reporter.log("[INIT] Setup complete!");
    reporter.log("");
}

fn synthesize_design(config: &RunConfig, design_num: u32, sampler: &mut dyn Sampler) -> DesignResult {
    DesignResult {
        name: format!("{}_design_{design_num:03}", config.binder_name),
        plddt: sampler.uniform(75.0, 95.0),
        pae: sampler.uniform(2.0, 12.0),
        dsasa: sampler.uniform(500.0, 1200.0),
        shape_comp: sampler.uniform(55.0, 85.0),
        dg: sampler.uniform(-25.0, -10.0),
        length: sampler.length(config.min_length, config.max_length),
        status: DesignStatus::Accepted,
    }
}

fn emit_summary(reporter: &EventReporter, trajectories_run: u32, accepted: u32, cancelled: bool) {
    let rule = "=".repeat(RULE_WIDTH);
    reporter.log("");
    if cancelled {
        reporter.log("[STOPPED] Run stopped by user.");
        reporter.log("");
    }
    reporter.log(rule.clone());
    reporter.log("Pipeline Complete!");
    reporter.log(rule);
    reporter.log(format!("Total trajectories run: {trajectories_run}"));
    reporter.log(format!("Accepted designs: {accepted}"));
    reporter.log("");
    reporter.log("[DEMO] In the real version, this would:");
    reporter.log("  • Use AlphaFold2/RFdiffusion for de novo backbone generation");
    reporter.log("  • Use ProteinMPNN for sequence design");
    reporter.log("  • Use AlphaFold2 for structure prediction and validation");
    reporter.log("  • Generate 3D structures for the interactive viewer");
    reporter.log("  • Generate analysis plots (PAE, pLDDT, contacts)");
    reporter.log("  • Save PDB files and statistics to disk");
    reporter.log("");
}

fn percent_done(trajectory: u32, max_trajectories: u32) -> u8 {
    (u64::from(trajectory) * 100 / u64::from(max_trajectories)) as u8
}

fn enabled_text(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::RunConfigBuilder;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct ScriptedSampler {
        passes: VecDeque<bool>,
    }

    impl ScriptedSampler {
        fn new(passes: &[bool]) -> Self {
            Self {
                passes: passes.iter().copied().collect(),
            }
        }
    }

    impl Sampler for ScriptedSampler {
        fn draw_pass(&mut self, _acceptance_rate: f64) -> bool {
            self.passes.pop_front().unwrap_or(false)
        }

        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            (low + high) / 2.0
        }

        fn length(&mut self, min: u32, max: u32) -> u32 {
            min + (max - min) / 2
        }
    }

    fn capture() -> (EventReporter<'static>, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = EventReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        (reporter, events)
    }

    fn config(min: u32, max: u32, max_trajectories: u32, target_designs: u32) -> RunConfig {
        RunConfigBuilder::new()
            .min_length(min)
            .max_length(max)
            .max_trajectories(max_trajectories)
            .target_designs(target_designs)
            .build()
            .unwrap()
    }

    fn run_scripted(config: &RunConfig, passes: &[bool]) -> (RunSummary, Vec<Event>) {
        let (reporter, events) = capture();
        let mut sampler = ScriptedSampler::new(passes);
        let summary = run(
            config,
            &reporter,
            &CancelToken::new(),
            &mut sampler,
            &Pacing::instant(),
        )
        .unwrap();
        let events = events.lock().unwrap().clone();
        (summary, events)
    }

    fn trajectory_starts(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|event| {
                matches!(event, Event::Log(line) if line.contains("Starting trajectory"))
            })
            .count()
    }

    fn progress_values(events: &[Event]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::Progress(percent) => Some(*percent),
                _ => None,
            })
            .collect()
    }

    fn accepted_designs(events: &[Event]) -> Vec<&DesignResult> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::DesignAccepted(design) => Some(design),
                _ => None,
            })
            .collect()
    }

    fn has_log(events: &[Event], needle: &str) -> bool {
        events
            .iter()
            .any(|event| matches!(event, Event::Log(line) if line.contains(needle)))
    }

    #[test]
    fn all_failures_attempt_every_trajectory() {
        let (summary, events) = run_scripted(&config(50, 100, 5, 2), &[]);

        assert_eq!(summary.trajectories_run, 5);
        assert_eq!(summary.accepted, 0);
        assert!(!summary.cancelled);
        assert_eq!(trajectory_starts(&events), 5);
        assert!(accepted_designs(&events).is_empty());
        assert!(!has_log(&events, "[SUCCESS]"));
    }

    #[test]
    fn reaching_the_target_stops_the_loop_early() {
        let (summary, events) = run_scripted(&config(50, 100, 10, 2), &[true, true]);

        assert_eq!(summary.trajectories_run, 2);
        assert_eq!(summary.accepted, 2);
        assert_eq!(trajectory_starts(&events), 2);
        assert_eq!(accepted_designs(&events).len(), 2);
        assert!(has_log(&events, "[SUCCESS] Reached target of 2 accepted designs!"));
    }

    #[test]
    fn accepted_count_never_exceeds_the_target() {
        let passes = [true, true, true, true, true];
        let (summary, events) = run_scripted(&config(50, 100, 10, 2), &passes);

        assert_eq!(summary.accepted, 2);
        assert_eq!(accepted_designs(&events).len(), 2);
    }

    #[test]
    fn progress_is_non_decreasing_and_ends_at_100() {
        let (_, events) = run_scripted(&config(50, 100, 4, 10), &[]);

        let progress = progress_values(&events);
        assert_eq!(progress, vec![25, 50, 75, 100, 100]);
        assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn progress_uses_floor_arithmetic() {
        let (_, events) = run_scripted(&config(50, 100, 3, 10), &[]);
        assert_eq!(progress_values(&events), vec![33, 66, 100, 100]);
    }

    #[test]
    fn design_numbering_and_metrics_follow_the_config() {
        let (_, events) = run_scripted(&config(50, 60, 10, 3), &[true, false, true]);

        let designs = accepted_designs(&events);
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].name, "my_binder_design_001");
        assert_eq!(designs[1].name, "my_binder_design_002");

        for design in designs {
            assert!((75.0..=95.0).contains(&design.plddt));
            assert!(design.pae >= 0.0);
            assert!(design.dsasa >= 0.0);
            assert!((0.0..=100.0).contains(&design.shape_comp));
            assert!(design.dg < 0.0);
            assert!((50..=60).contains(&design.length));
            assert_eq!(design.status, DesignStatus::Accepted);
        }
    }

    #[test]
    fn single_trajectory_pass_scenario() {
        let (summary, events) = run_scripted(&config(50, 50, 1, 1), &[true]);

        assert_eq!(summary.trajectories_run, 1);
        assert_eq!(summary.accepted, 1);
        assert_eq!(trajectory_starts(&events), 1);

        let designs = accepted_designs(&events);
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].length, 50);
        assert!(has_log(&events, "[SUCCESS]"));
        // The success stop skips the per-trajectory update; only the terminal
        // progress remains.
        assert_eq!(progress_values(&events), vec![100]);
    }

    #[test]
    fn single_trajectory_fail_scenario() {
        let (summary, events) = run_scripted(&config(50, 50, 1, 1), &[false]);

        assert_eq!(summary.trajectories_run, 1);
        assert_eq!(summary.accepted, 0);
        assert!(accepted_designs(&events).is_empty());
        assert!(has_log(&events, "✗ Failed filters"));
        assert!(has_log(&events, "Accepted designs: 0"));
        assert_eq!(progress_values(&events), vec![100, 100]);
    }

    #[test]
    fn cancellation_before_the_first_trajectory() {
        let (reporter, events) = capture();
        let cancel = CancelToken::new();
        cancel.cancel();

        let summary = run(
            &config(50, 100, 10, 5),
            &reporter,
            &cancel,
            &mut ScriptedSampler::new(&[]),
            &Pacing::instant(),
        )
        .unwrap();
        let events = events.lock().unwrap().clone();

        assert_eq!(summary.trajectories_run, 0);
        assert!(summary.cancelled);
        assert_eq!(trajectory_starts(&events), 0);
        assert!(has_log(&events, "[STOPPED]"));
        assert_eq!(progress_values(&events), vec![100]);
    }

    #[test]
    fn cancellation_is_observed_at_the_next_trajectory_boundary() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancelToken::new();

        // Cancel from inside the event stream: the flag goes up while
        // trajectory 1 is mid-block, so the simulator must still finish that
        // block and stop before trajectory 2.
        let sink = Arc::clone(&events);
        let sink_cancel = cancel.clone();
        let reporter = EventReporter::with_callback(Box::new(move |event| {
            if let Event::Log(line) = &event {
                if line.contains("Failed filters") {
                    sink_cancel.cancel();
                }
            }
            sink.lock().unwrap().push(event);
        }));

        let summary = run(
            &config(50, 100, 10, 5),
            &reporter,
            &cancel,
            &mut ScriptedSampler::new(&[]),
            &Pacing::instant(),
        )
        .unwrap();
        let events = events.lock().unwrap().clone();

        assert_eq!(summary.trajectories_run, 1);
        assert!(summary.cancelled);
        assert_eq!(trajectory_starts(&events), 1);
        assert!(has_log(&events, "[STOPPED]"));
        assert_eq!(progress_values(&events), vec![10, 100]);
    }

    #[test]
    fn invalid_config_is_rejected_before_any_event() {
        let (reporter, events) = capture();
        let bad_config = RunConfig {
            min_length: 80,
            max_length: 50,
            ..RunConfig::default()
        };

        let result = run(
            &bad_config,
            &reporter,
            &CancelToken::new(),
            &mut ScriptedSampler::new(&[]),
            &Pacing::instant(),
        );

        assert!(matches!(result, Err(SimulationError::InvalidConfig { .. })));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn banner_echoes_the_full_configuration() {
        let config = RunConfigBuilder::new()
            .binder_name("il7ra_binder")
            .target_chains("A,B")
            .hotspot_residues("58,80,139")
            .build()
            .unwrap();
        let (reporter, events) = capture();

        run(
            &config,
            &reporter,
            &CancelToken::new(),
            &mut ScriptedSampler::new(&[]),
            &Pacing::instant(),
        )
        .unwrap();
        let events = events.lock().unwrap().clone();

        assert!(has_log(&events, "Binder Name: il7ra_binder"));
        assert!(has_log(&events, "Target Chains: A,B"));
        assert!(has_log(&events, "Hotspot Residues: 58,80,139"));
        assert!(has_log(&events, "Binder Length: 50-100 aa"));
        assert!(has_log(&events, "Advanced Profile: default_4stage_multimer"));
        assert!(has_log(&events, "Max Trajectories: 100"));
    }
}
