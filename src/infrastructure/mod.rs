//! Infrastructure layer: file-backed inputs
//!
//! This layer reads rosters from disk and wraps I/O failures.

pub mod error;
pub mod roster;

pub use error::{InfraError, InfraResult};
pub use roster::{load_roster, parse_roster};
