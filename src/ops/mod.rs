//! High-level operations.
//!
//! This module contains the implementation of crossplan commands.

pub mod build;
pub mod plan;

pub use build::{build, emit, BuildOutcome};
pub use plan::{plan, PlanRequest, PlannedBuild};
