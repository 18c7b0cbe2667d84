//! Domain layer: entities and tree logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{OrgNode, OrgTree};
pub use builder::{build_tree, OrgTreeBuilder, TreeResult};
pub use entities::*;
pub use error::DomainError;
pub use render::{stringify, stringify_from, TreeDisplay};
