use cobweb_core::{AttrValue, ConceptId};

use crate::counts::ConceptStats;

/// One node of the classification tree.
///
/// Children are owned by the arena and referenced by id; the parent link is a
/// plain non-owning id so the tree stays cycle-free. Child order carries no
/// meaning but is kept stable for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    pub(crate) id: ConceptId,
    pub(crate) stats: ConceptStats,
    pub(crate) parent: Option<ConceptId>,
    pub(crate) children: Vec<ConceptId>,
}

impl ConceptNode {
    pub(crate) fn new(id: ConceptId, parent: Option<ConceptId>) -> Self {
        Self {
            id,
            stats: ConceptStats::new(),
            parent,
            children: Vec::new(),
        }
    }

    /// This node's id.
    pub fn id(&self) -> ConceptId {
        self.id
    }

    /// The parent's id, or `None` for the root.
    pub fn parent(&self) -> Option<ConceptId> {
        self.parent
    }

    /// Child ids in stable order.
    pub fn children(&self) -> &[ConceptId] {
        &self.children
    }

    /// A node with no children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of instances absorbed by this node or any descendant.
    pub fn count(&self) -> u64 {
        self.stats.count()
    }

    /// The node's sufficient statistics.
    pub fn stats(&self) -> &ConceptStats {
        &self.stats
    }

    /// P(attr = value) at this concept; 0.0 for unseen pairs.
    pub fn probability(&self, attr: &str, value: &AttrValue) -> f64 {
        self.stats.probability(attr, value)
    }
}
