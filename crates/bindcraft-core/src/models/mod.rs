//! # Models Module
//!
//! Plain data records shared between the simulation engine and its consumers.
//!
//! Everything in this module is immutable after construction and safe to hand
//! across thread boundaries: once the engine emits a record, ownership belongs
//! to whichever sink received it.
//!
//! - [`design`] - Accepted design results and their status tag

pub mod design;
