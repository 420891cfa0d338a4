//! Projection engine for annual cohort-component projections

mod state;
mod engine;
mod results;

pub use state::{BirthCohort, ProjectionState};
pub use engine::{run_projection, ProjectionConfig, ProjectionEngine};
pub use results::{ProjectionResult, ProjectionSummary, YearResult};
