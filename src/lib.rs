//! orgtree: build an organization chart from flat person records and verify it.
//!
//! Layers, innermost first:
//! - [`domain`]: people, the arena-backed [`domain::OrgTree`], building and stringifying
//! - [`application`]: the verification harness and sample organization
//! - [`infrastructure`]: roster files
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{run_check, run_suite, CheckOutcome, Verifier};
pub use domain::{build_tree, stringify, DomainError, OrgTree, Person, PersonId};
