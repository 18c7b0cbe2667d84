//! Application layer: verification harness and sample data

pub mod error;
pub mod fixtures;
pub mod verifier;

pub use error::{ApplicationError, ApplicationResult};
pub use fixtures::{sample_org, SAMPLE_CEO, SAMPLE_EXPECTED};
pub use verifier::{run_check, run_suite, CheckOutcome, Verifier, DEFAULT_SHUFFLE_ROUNDS};
