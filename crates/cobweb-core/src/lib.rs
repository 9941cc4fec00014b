//! # cobweb-core
//!
//! Foundation crate for the Cobweb concept-formation engine.
//! Defines instance/value types, concept identifiers, config, errors,
//! and small numeric helpers. The tree engine crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod id;
pub mod instance;
pub mod stats;

// Re-export the most commonly used types at the crate root.
pub use config::CobwebConfig;
pub use errors::{CobwebError, CobwebResult, TreeError};
pub use id::ConceptId;
pub use instance::{AttrValue, Instance};
