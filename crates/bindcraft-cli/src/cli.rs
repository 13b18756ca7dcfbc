use bindcraft::engine::config::AdvancedProfile;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "BindCraft demo CLI - A terminal front-end for the simulated binder-design pipeline. Streams the pipeline's log, progress, and result events without performing any real computation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a simulated binder-design run and stream its events to the terminal.
    Run(RunArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Target Overrides ---
    /// Override the binder name used for generated design names.
    #[arg(long, value_name = "NAME")]
    pub binder_name: Option<String>,

    /// Override the target chain identifiers (e.g. 'A' or 'A,B').
    #[arg(long, value_name = "CHAINS")]
    pub target_chains: Option<String>,

    /// Override the comma-separated hotspot residue numbers.
    #[arg(long, value_name = "RESIDUES")]
    pub hotspot_residues: Option<String>,

    // --- Design Overrides ---
    /// Override the minimum binder length in residues.
    #[arg(long, value_name = "INT")]
    pub min_length: Option<u32>,

    /// Override the maximum binder length in residues.
    #[arg(long, value_name = "INT")]
    pub max_length: Option<u32>,

    /// Override the advanced design profile
    /// (default_4stage_multimer, fast_2stage, high_quality_6stage).
    #[arg(short, long, value_name = "PROFILE")]
    pub profile: Option<AdvancedProfile>,

    /// Override `mpnn-redesign` from the config file.
    #[command(flatten)]
    pub mpnn_redesign: MpnnRedesign,

    /// Mark generated designs for FASTA export in the real pipeline.
    #[arg(long)]
    pub save_fasta: bool,

    // --- Trajectory Overrides ---
    /// Override the number of accepted designs that ends the run.
    #[arg(long, value_name = "INT")]
    pub target_designs: Option<u32>,

    /// Override the maximum number of trajectories to attempt.
    #[arg(long, value_name = "INT")]
    pub max_trajectories: Option<u32>,

    // --- Demo Controls ---
    /// Seed the simulated pipeline's random draws for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Skip the simulated stage delays and run at full speed.
    #[arg(long)]
    pub fast: bool,

    /// Write the accepted designs to a JSON file after the run.
    #[arg(short, long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

/// A group to handle mutually exclusive boolean flags for the MPNN redesign stage.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct MpnnRedesign {
    /// Force-enable the ProteinMPNN redesign stage.
    #[arg(long)]
    pub with_mpnn_redesign: bool,
    /// Force-disable the ProteinMPNN redesign stage.
    #[arg(long)]
    pub no_mpnn_redesign: bool,
}
