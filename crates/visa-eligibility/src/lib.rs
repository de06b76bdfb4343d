//! Student visa eligibility assessment.
//!
//! The [`assessment`] module holds the scoring engine and its reference tables. The
//! [`intake`] module turns questionnaire answers into the records the engine consumes.

pub mod assessment;
pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
