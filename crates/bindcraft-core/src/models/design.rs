use serde::Serialize;
use std::fmt;

/// Filter verdict attached to an emitted design.
///
/// The demo pipeline only ever surfaces designs that passed filtering, so
/// `Accepted` is the only variant; rejected trajectories produce log lines,
/// not results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DesignStatus {
    Accepted,
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignStatus::Accepted => write!(f, "Accepted"),
        }
    }
}

/// One accepted binder design, as a front-end results table would display it.
///
/// Metric values are synthesized by the simulator within realistic ranges;
/// see the trajectory workflow for the distributions used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignResult {
    /// Derived from the configured binder name plus a zero-padded sequence
    /// number, e.g. `my_binder_design_003`.
    pub name: String,
    pub plddt: f64,
    pub pae: f64,
    pub dsasa: f64,
    pub shape_comp: f64,
    pub dg: f64,
    /// Binder length in residues, within the configured length range.
    pub length: u32,
    pub status: DesignStatus,
}
