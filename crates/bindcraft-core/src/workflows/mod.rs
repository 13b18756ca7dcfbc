//! # Workflows Module
//!
//! High-level entry points that orchestrate a complete simulated pipeline
//! execution.
//!
//! ## Overview
//!
//! A workflow takes a validated configuration, an event reporter, a
//! cancellation token and a randomness source, and drives the full event
//! sequence of one run: banner, initialization, the trajectory loop, and the
//! terminal summary. Workflows are synchronous and runtime-agnostic; the run
//! controller decides which execution context they run on.
//!
//! - **Simulation Workflow** ([`simulate`]) - The mock binder-design pipeline:
//!   trajectory generation, filtering draws, design synthesis, and progress
//!   reporting.

pub mod simulate;
