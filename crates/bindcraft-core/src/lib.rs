//! # BindCraft Demo Core
//!
//! The simulation engine behind the BindCraft binder-design demo. Nothing here
//! performs real structure generation, sequence design, or prediction; the crate
//! exists to exercise the lifecycle of a long-running design pipeline — an
//! ordered event stream, cooperative cancellation, and clean partial-failure
//! behavior — so a front-end can be developed and demonstrated against it.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`models`]: The Foundation.** Stateless data records such as the
//!   [`DesignResult`](models::design::DesignResult) a passing trajectory
//!   produces. Immutable once constructed.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: run configuration and
//!   validation, the [`Event`](engine::events::Event) protocol, randomness
//!   sources, pacing, and the [`RunController`](engine::runner::RunController)
//!   that owns the background worker and its cancellation contract.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the `engine` and `models` together to execute a complete simulated
//!   pipeline run from initialization through terminal summary.

pub mod engine;
pub mod models;
pub mod workflows;
