use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use bindcraft::engine::config::{AdvancedProfile, FilterThresholds, RunConfig, RunConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Optional run parameters as they appear in a TOML configuration file.
///
/// Every field is optional; unset values fall back to the CLI override or the
/// built-in defaults, with precedence CLI > file > defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub binder_name: Option<String>,
    pub target_chains: Option<String>,
    pub hotspot_residues: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub advanced_profile: Option<String>,
    pub mpnn_redesign: Option<bool>,
    pub mpnn_save_fasta: Option<bool>,
    pub target_designs: Option<u32>,
    pub max_trajectories: Option<u32>,
    pub filters: Option<FileFilters>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileFilters {
    pub plddt_min: Option<f64>,
    pub dsasa_min: Option<f64>,
    pub shape_comp_min: Option<f64>,
    pub pae_max: Option<f64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let parsed = toml::from_str(&raw).map_err(|e| {
            CliError::Config(format!("failed to parse '{}': {}", path.display(), e))
        })?;
        debug!("Loaded run configuration from {:?}.", path);
        Ok(parsed)
    }
}

/// Merges the configuration file and CLI overrides into a validated snapshot.
pub fn build_run_config(args: &RunArgs) -> Result<RunConfig> {
    let file = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let defaults = RunConfig::default();

    let profile = match (args.profile, &file.advanced_profile) {
        (Some(profile), _) => profile,
        (None, Some(name)) => name
            .parse::<AdvancedProfile>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => defaults.advanced_profile,
    };

    let mpnn_redesign = match (
        args.mpnn_redesign.with_mpnn_redesign,
        args.mpnn_redesign.no_mpnn_redesign,
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => file.mpnn_redesign.unwrap_or(defaults.mpnn_redesign),
    };

    let mpnn_save_fasta = if args.save_fasta {
        true
    } else {
        file.mpnn_save_fasta.unwrap_or(defaults.mpnn_save_fasta)
    };

    let file_filters = file.filters.unwrap_or_default();
    let filters = FilterThresholds {
        plddt_min: file_filters.plddt_min.unwrap_or(defaults.filters.plddt_min),
        dsasa_min: file_filters.dsasa_min.unwrap_or(defaults.filters.dsasa_min),
        shape_comp_min: file_filters
            .shape_comp_min
            .unwrap_or(defaults.filters.shape_comp_min),
        pae_max: file_filters.pae_max.unwrap_or(defaults.filters.pae_max),
    };

    RunConfigBuilder::new()
        .binder_name(
            args.binder_name
                .clone()
                .or(file.binder_name)
                .unwrap_or(defaults.binder_name),
        )
        .target_chains(
            args.target_chains
                .clone()
                .or(file.target_chains)
                .unwrap_or(defaults.target_chains),
        )
        .hotspot_residues(
            args.hotspot_residues
                .clone()
                .or(file.hotspot_residues)
                .unwrap_or(defaults.hotspot_residues),
        )
        .min_length(args.min_length.or(file.min_length).unwrap_or(defaults.min_length))
        .max_length(args.max_length.or(file.max_length).unwrap_or(defaults.max_length))
        .advanced_profile(profile)
        .mpnn_redesign(mpnn_redesign)
        .mpnn_save_fasta(mpnn_save_fasta)
        .target_designs(
            args.target_designs
                .or(file.target_designs)
                .unwrap_or(defaults.target_designs),
        )
        .max_trajectories(
            args.max_trajectories
                .or(file.max_trajectories)
                .unwrap_or(defaults.max_trajectories),
        )
        .filters(filters)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}
