//! # cobweb-tree
//!
//! Incremental, unsupervised concept formation over categorical instances.
//!
//! A [`CobwebTree`] absorbs one instance at a time ([`CobwebTree::ifit`]),
//! organizing them into a hierarchy of probabilistic concepts. At every level
//! of the descent the driver scores four competing structural edits — insert
//! into the best child, create a new child, merge the two best children, or
//! split the best child — against the category-utility objective and applies
//! the winner. Later instances can then be classified
//! ([`CobwebTree::categorize`]) or completed ([`CobwebTree::predict`])
//! without revisiting prior data.

pub mod arena;
pub mod counts;
pub mod export;
pub mod node;
pub mod tree;
pub mod utility;

mod predict;

pub use counts::ConceptStats;
pub use export::ConceptDump;
pub use node::ConceptNode;
pub use tree::{CobwebTree, FitResult};
pub use utility::Operation;
