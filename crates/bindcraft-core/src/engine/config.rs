use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("minimum length {min} exceeds maximum length {max}")]
    LengthRange { min: u32, max: u32 },

    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    #[error("unknown advanced profile: {0}")]
    UnknownProfile(String),
}

/// Named multi-stage design presets offered by the pipeline.
///
/// In the demo these only influence what the run banner echoes; a real
/// pipeline would map them to different stage schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvancedProfile {
    #[default]
    #[serde(rename = "default_4stage_multimer")]
    Default4StageMultimer,
    #[serde(rename = "fast_2stage")]
    Fast2Stage,
    #[serde(rename = "high_quality_6stage")]
    HighQuality6Stage,
}

impl AdvancedProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvancedProfile::Default4StageMultimer => "default_4stage_multimer",
            AdvancedProfile::Fast2Stage => "fast_2stage",
            AdvancedProfile::HighQuality6Stage => "high_quality_6stage",
        }
    }
}

impl fmt::Display for AdvancedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvancedProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default_4stage_multimer" => Ok(AdvancedProfile::Default4StageMultimer),
            "fast_2stage" => Ok(AdvancedProfile::Fast2Stage),
            "high_quality_6stage" => Ok(AdvancedProfile::HighQuality6Stage),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

/// Acceptance thresholds a real pipeline would filter designs against.
///
/// The demo echoes them in the run banner; the simulated pass/fail draw does
/// not consult them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilterThresholds {
    pub plddt_min: f64,
    pub dsasa_min: f64,
    pub shape_comp_min: f64,
    pub pae_max: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            plddt_min: 80.0,
            dsasa_min: 600.0,
            shape_comp_min: 60.0,
            pae_max: 10.0,
        }
    }
}

/// Immutable snapshot of the parameters a run is started with.
///
/// A snapshot is captured once at `start` and owned by that run; later edits
/// on the caller's side never affect a run in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub binder_name: String,
    pub target_chains: String,
    pub hotspot_residues: String,
    pub min_length: u32,
    pub max_length: u32,
    pub advanced_profile: AdvancedProfile,
    pub mpnn_redesign: bool,
    pub mpnn_save_fasta: bool,
    pub target_designs: u32,
    pub max_trajectories: u32,
    pub filters: FilterThresholds,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            binder_name: "my_binder".to_string(),
            target_chains: "A".to_string(),
            hotspot_residues: "24,25,26,27".to_string(),
            min_length: 50,
            max_length: 100,
            advanced_profile: AdvancedProfile::default(),
            mpnn_redesign: true,
            mpnn_save_fasta: false,
            target_designs: 10,
            max_trajectories: 100,
            filters: FilterThresholds::default(),
        }
    }
}

impl RunConfig {
    /// Checks the numeric invariants the simulator depends on.
    ///
    /// The simulator revalidates on entry, so collaborators that bypass the
    /// builder still get a graceful failure instead of a crashed worker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::ZeroCount("min_length"));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::LengthRange {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.target_designs == 0 {
            return Err(ConfigError::ZeroCount("target_designs"));
        }
        if self.max_trajectories == 0 {
            return Err(ConfigError::ZeroCount("max_trajectories"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RunConfigBuilder {
    binder_name: Option<String>,
    target_chains: Option<String>,
    hotspot_residues: Option<String>,
    min_length: Option<u32>,
    max_length: Option<u32>,
    advanced_profile: Option<AdvancedProfile>,
    mpnn_redesign: Option<bool>,
    mpnn_save_fasta: Option<bool>,
    target_designs: Option<u32>,
    max_trajectories: Option<u32>,
    filters: Option<FilterThresholds>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binder_name(mut self, name: impl Into<String>) -> Self {
        self.binder_name = Some(name.into());
        self
    }
    pub fn target_chains(mut self, chains: impl Into<String>) -> Self {
        self.target_chains = Some(chains.into());
        self
    }
    pub fn hotspot_residues(mut self, residues: impl Into<String>) -> Self {
        self.hotspot_residues = Some(residues.into());
        self
    }
    pub fn min_length(mut self, length: u32) -> Self {
        self.min_length = Some(length);
        self
    }
    pub fn max_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }
    pub fn advanced_profile(mut self, profile: AdvancedProfile) -> Self {
        self.advanced_profile = Some(profile);
        self
    }
    pub fn mpnn_redesign(mut self, enabled: bool) -> Self {
        self.mpnn_redesign = Some(enabled);
        self
    }
    pub fn mpnn_save_fasta(mut self, enabled: bool) -> Self {
        self.mpnn_save_fasta = Some(enabled);
        self
    }
    pub fn target_designs(mut self, count: u32) -> Self {
        self.target_designs = Some(count);
        self
    }
    pub fn max_trajectories(mut self, count: u32) -> Self {
        self.max_trajectories = Some(count);
        self
    }
    pub fn filters(mut self, filters: FilterThresholds) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Fills unset fields from the demo defaults and validates the result.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let defaults = RunConfig::default();
        let config = RunConfig {
            binder_name: self.binder_name.unwrap_or(defaults.binder_name),
            target_chains: self.target_chains.unwrap_or(defaults.target_chains),
            hotspot_residues: self.hotspot_residues.unwrap_or(defaults.hotspot_residues),
            min_length: self.min_length.unwrap_or(defaults.min_length),
            max_length: self.max_length.unwrap_or(defaults.max_length),
            advanced_profile: self.advanced_profile.unwrap_or(defaults.advanced_profile),
            mpnn_redesign: self.mpnn_redesign.unwrap_or(defaults.mpnn_redesign),
            mpnn_save_fasta: self.mpnn_save_fasta.unwrap_or(defaults.mpnn_save_fasta),
            target_designs: self.target_designs.unwrap_or(defaults.target_designs),
            max_trajectories: self.max_trajectories.unwrap_or(defaults.max_trajectories),
            filters: self.filters.unwrap_or(defaults.filters),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_demo_panel_values() {
        let config = RunConfigBuilder::new().build().unwrap();

        assert_eq!(config.binder_name, "my_binder");
        assert_eq!(config.target_chains, "A");
        assert_eq!(config.hotspot_residues, "24,25,26,27");
        assert_eq!(config.min_length, 50);
        assert_eq!(config.max_length, 100);
        assert_eq!(config.target_designs, 10);
        assert_eq!(config.max_trajectories, 100);
        assert!(config.mpnn_redesign);
        assert!(!config.mpnn_save_fasta);
    }

    #[test]
    fn builder_rejects_inverted_length_range() {
        let result = RunConfigBuilder::new()
            .min_length(120)
            .max_length(80)
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::LengthRange { min: 120, max: 80 }
        );
    }

    #[test]
    fn builder_rejects_zero_counts() {
        let no_targets = RunConfigBuilder::new().target_designs(0).build();
        assert_eq!(
            no_targets.unwrap_err(),
            ConfigError::ZeroCount("target_designs")
        );

        let no_trajectories = RunConfigBuilder::new().max_trajectories(0).build();
        assert_eq!(
            no_trajectories.unwrap_err(),
            ConfigError::ZeroCount("max_trajectories")
        );
    }

    #[test]
    fn validate_catches_hand_built_invalid_snapshot() {
        let config = RunConfig {
            min_length: 80,
            max_length: 50,
            ..RunConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::LengthRange { min: 80, max: 50 })
        ));
    }

    #[test]
    fn profile_round_trips_through_its_wire_names() {
        for profile in [
            AdvancedProfile::Default4StageMultimer,
            AdvancedProfile::Fast2Stage,
            AdvancedProfile::HighQuality6Stage,
        ] {
            assert_eq!(profile.to_string().parse::<AdvancedProfile>(), Ok(profile));
        }
    }

    #[test]
    fn unknown_profile_name_is_rejected() {
        let result = "ultra_fast_1stage".parse::<AdvancedProfile>();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnknownProfile("ultra_fast_1stage".to_string())
        );
    }
}
