use crate::cli::RunArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::ui::UiEvent;
use bindcraft::engine::events::Event;
use bindcraft::engine::pacing::Pacing;
use bindcraft::engine::runner::RunController;
use bindcraft::engine::sampling::{Sampler, StdSampler};
use bindcraft::models::design::DesignResult;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{info, warn};

pub async fn run(args: RunArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let run_config = config::build_run_config(&args)?;
    info!("Run configuration assembled; starting the pipeline worker.");

    let pacing = if args.fast {
        Pacing::instant()
    } else {
        Pacing::demo()
    };
    let mut controller = RunController::with_pacing(pacing);

    let sampler: Box<dyn Sampler> = match args.seed {
        Some(seed) => {
            info!(seed, "Using a seeded sampler for a reproducible run.");
            Box::new(StdSampler::seeded(seed))
        }
        None => Box::new(StdSampler::from_entropy()),
    };
    let events = controller.start_with_sampler(run_config, sampler)?;

    // Bridge the worker's blocking channel onto the async UI channel,
    // collecting the accepted designs along the way for export.
    let forward_sender = ui_sender.clone();
    let mut forwarder = task::spawn_blocking(move || {
        let mut accepted: Vec<DesignResult> = Vec::new();
        for event in events {
            if let Event::DesignAccepted(design) = &event {
                accepted.push(design.clone());
            }
            if forward_sender
                .blocking_send(UiEvent::Pipeline(event))
                .is_err()
            {
                warn!("UI channel closed; discarding remaining pipeline events.");
                break;
            }
        }
        accepted
    });

    let accepted = tokio::select! {
        forwarded = &mut forwarder => {
            forwarded.map_err(|e| CliError::Other(anyhow::anyhow!("event forwarder task failed: {e}")))?
        }
        _ = tokio::signal::ctrl_c() => {
            ui_sender
                .send(UiEvent::Notice(
                    "Stop requested; waiting for the pipeline to wind down...".to_string(),
                ))
                .await
                .ok();
            // Cooperative stop: signal the worker, then wait for it to emit
            // its terminal event and exit before draining what remains.
            task::block_in_place(|| controller.stop());
            (&mut forwarder)
                .await
                .map_err(|e| CliError::Other(anyhow::anyhow!("event forwarder task failed: {e}")))?
        }
    };

    info!(accepted = accepted.len(), "Run complete.");

    if let Some(path) = &args.export {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &accepted)?;
        ui_sender
            .send(UiEvent::Notice(format!(
                "Exported {} accepted design(s) to {}",
                accepted.len(),
                path.display()
            )))
            .await
            .ok();
    }

    Ok(())
}
