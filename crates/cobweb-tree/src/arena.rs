//! Slot arena owning every node of one tree.

use cobweb_core::{ConceptId, TreeError};

use crate::node::ConceptNode;

/// Arena of concept nodes indexed by [`ConceptId`].
///
/// Ids are allocated monotonically and never reused: a node removed by a
/// split (or by the min-utility collapse) leaves an empty slot behind, so any
/// id an external caller still holds either resolves to the same node or to
/// nothing — never to a different one.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Option<ConceptNode>>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh node under `parent`.
    pub(crate) fn alloc(&mut self, parent: Option<ConceptId>) -> ConceptId {
        let id = ConceptId::new(self.nodes.len() as u64);
        self.nodes.push(Some(ConceptNode::new(id, parent)));
        id
    }

    /// Look up a live node.
    pub fn get(&self, id: ConceptId) -> Option<&ConceptNode> {
        self.nodes.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Look up a live node, failing with [`TreeError::UnknownConcept`].
    pub fn try_get(&self, id: ConceptId) -> Result<&ConceptNode, TreeError> {
        self.get(id).ok_or(TreeError::UnknownConcept { concept: id })
    }

    /// Internal access to an id the tree itself produced.
    pub(crate) fn node(&self, id: ConceptId) -> &ConceptNode {
        self.nodes[id.index()].as_ref().expect("live concept")
    }

    pub(crate) fn node_mut(&mut self, id: ConceptId) -> &mut ConceptNode {
        self.nodes[id.index()].as_mut().expect("live concept")
    }

    /// Remove a node from the arena, leaving its slot empty.
    pub(crate) fn detach(&mut self, id: ConceptId) -> ConceptNode {
        self.nodes[id.index()].take().expect("live concept")
    }

    /// Number of live nodes across the whole arena.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }
}
