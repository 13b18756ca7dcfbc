//! # Engine Module
//!
//! This module implements the execution machinery for the simulated design
//! pipeline: configuration, the event protocol, randomness, pacing, and the
//! run controller that owns the background worker.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of a run's lifecycle:
//!
//! - **Configuration** ([`config`]) - Run parameters, presets, and validation
//! - **Event Protocol** ([`events`]) - The ordered stream a run emits and the
//!   reporter seam the simulator writes through
//! - **Error Handling** ([`error`]) - Simulator-boundary fault types
//! - **Randomness** ([`sampling`]) - The pluggable outcome source, so tests can
//!   script pass/fail sequences instead of sampling statistically
//! - **Pacing** ([`pacing`]) - The simulated stage delays that emulate a live
//!   pipeline's rhythm
//! - **Run Control** ([`runner`]) - Start/stop lifecycle, the worker thread,
//!   and cooperative cancellation
//!
//! ## Concurrency Contract
//!
//! At most one simulator executes per controller at any time. Events cross the
//! thread boundary over an order-preserving channel; the cancellation and
//! completion flags are the only other shared state, and both are atomic.

pub mod config;
pub mod error;
pub mod events;
pub mod pacing;
pub mod runner;
pub mod sampling;
