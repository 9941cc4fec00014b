//! The concept tree and the cobweb driver.

use std::collections::BTreeMap;

use cobweb_core::{AttrValue, CobwebConfig, CobwebResult, ConceptId, Instance, TreeError};
use tracing::{debug, trace};

use crate::arena::NodeArena;
use crate::node::ConceptNode;
use crate::utility::{self, Operation};

/// Outcome of incorporating one instance.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// The terminal node the instance landed in.
    pub node: ConceptId,
    /// Node-identity remapping produced by fringe splits during this call:
    /// a leaf that was demoted maps to the child now holding its old
    /// statistics. Callers holding references into the tree resolve stale
    /// ids through this table.
    pub remapped: BTreeMap<ConceptId, ConceptId>,
}

/// Incremental concept-formation tree over categorical instances.
#[derive(Debug, Clone)]
pub struct CobwebTree {
    pub(crate) arena: NodeArena,
    root: ConceptId,
    /// Driver tuning; `min_cu` gates every structural edit.
    pub config: CobwebConfig,
}

impl Default for CobwebTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CobwebTree {
    /// An empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(CobwebConfig::default())
    }

    /// An empty tree with the given configuration.
    pub fn with_config(config: CobwebConfig) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(None);
        Self {
            arena,
            root,
            config,
        }
    }

    /// The root concept's id.
    pub fn root(&self) -> ConceptId {
        self.root
    }

    /// Look up a concept node.
    pub fn node(&self, id: ConceptId) -> CobwebResult<&ConceptNode> {
        Ok(self.arena.try_get(id)?)
    }

    /// Number of concepts in the tree.
    pub fn num_concepts(&self) -> usize {
        self.count_from(self.root)
    }

    fn count_from(&self, id: ConceptId) -> usize {
        1 + self
            .arena
            .node(id)
            .children
            .iter()
            .map(|&c| self.count_from(c))
            .sum::<usize>()
    }

    /// Incrementally incorporate one instance, restructuring as needed.
    pub fn ifit(&mut self, instance: &Instance) -> FitResult {
        self.cobweb(instance)
    }

    /// Incorporate each instance in order.
    pub fn fit(&mut self, instances: &[Instance]) {
        for instance in instances {
            self.ifit(instance);
        }
    }

    /// The driver loop: descend from the root, at each level scoring the
    /// candidate operations against the two best-matching children and
    /// applying the winner, until the instance comes to rest in a leaf.
    fn cobweb(&mut self, instance: &Instance) -> FitResult {
        let min_cu = self.config.min_cu;
        let mut remapped = BTreeMap::new();
        let mut current = self.root;

        loop {
            if self.arena.node(current).is_leaf() {
                // Rather than testing for an exact match, test whether a
                // fringe split would raise utility. Near-identical instances
                // keep the leaf a leaf, which keeps the tree from growing.
                if utility::cu_for_fringe_split(&self.arena, current, instance) <= min_cu {
                    self.arena.node_mut(current).stats.increment(instance);
                    debug!(concept = %current, "absorbed into leaf");
                    return FitResult {
                        node: current,
                        remapped,
                    };
                }

                // Fringe split: demote the leaf's statistics into a new
                // child, then add the instance as a second sibling.
                if let Some(demoted) = self.create_child_with_current_counts(current) {
                    remapped.insert(current, demoted);
                }
                self.arena.node_mut(current).stats.increment(instance);
                let leaf = self.create_new_child(current, instance);
                debug!(concept = %current, leaf = %leaf, "fringe split");
                return FitResult {
                    node: leaf,
                    remapped,
                };
            }

            let ranked = utility::rank_children(&self.arena, current, instance);
            let best1 = ranked[0];
            let best2 = ranked.get(1).copied();
            let (action_cu, op) =
                utility::get_best_operation(&self.arena, current, instance, best1, best2);
            trace!(concept = %current, cu = action_cu, op = ?op, "candidate selected");

            if action_cu <= min_cu {
                // The children no longer earn their keep: absorb the
                // instance here and collapse the subtree back into a leaf.
                self.arena.node_mut(current).stats.increment(instance);
                self.prune_children(current);
                debug!(concept = %current, "collapsed to leaf");
                return FitResult {
                    node: current,
                    remapped,
                };
            }

            match op {
                Operation::Best => {
                    self.arena.node_mut(current).stats.increment(instance);
                    current = best1.1;
                }
                Operation::New => {
                    self.arena.node_mut(current).stats.increment(instance);
                    let leaf = self.create_new_child(current, instance);
                    debug!(parent = %current, leaf = %leaf, "new child");
                    return FitResult {
                        node: leaf,
                        remapped,
                    };
                }
                Operation::Merge => {
                    let Some((_, second)) = best2 else {
                        unreachable!("merge is only offered with a second-best child");
                    };
                    self.arena.node_mut(current).stats.increment(instance);
                    let merged = self.merge_children(current, best1.1, second);
                    debug!(parent = %current, merged = %merged, "merged two best children");
                    // Re-evaluate the instance against the merged node's
                    // children on the next pass.
                    current = merged;
                }
                Operation::Split => {
                    // The instance has not been counted at this level yet;
                    // the loop re-evaluates at the same node.
                    self.split_unchecked(current, best1.1);
                }
            }
        }
    }

    /// Read-only classification: descend by best insert utility to a leaf
    /// without mutating any counts.
    pub fn categorize(&self, instance: &Instance) -> ConceptId {
        let mut current = self.root;
        while !self.arena.node(current).is_leaf() {
            let ranked = utility::rank_children(&self.arena, current, instance);
            current = ranked[0].1;
        }
        current
    }

    /// The two best children of `id` for receiving `instance`.
    pub fn two_best_children(
        &self,
        id: ConceptId,
        instance: &Instance,
    ) -> CobwebResult<((f64, ConceptId), Option<(f64, ConceptId)>)> {
        self.arena.try_get(id)?;
        Ok(utility::two_best_children(&self.arena, id, instance)?)
    }

    /// Category utility of the node's current division into children.
    pub fn category_utility(&self, id: ConceptId) -> CobwebResult<f64> {
        self.arena.try_get(id)?;
        Ok(utility::category_utility(&self.arena, id))
    }

    /// Utility of `parent` if `instance` were added to its child `child`.
    pub fn cu_for_insert(
        &self,
        parent: ConceptId,
        child: ConceptId,
        instance: &Instance,
    ) -> CobwebResult<f64> {
        self.require_child(parent, child)?;
        Ok(utility::cu_for_insert(&self.arena, parent, child, instance))
    }

    /// Utility of `parent` if a new child were created for `instance`.
    pub fn cu_for_new_child(&self, parent: ConceptId, instance: &Instance) -> CobwebResult<f64> {
        self.arena.try_get(parent)?;
        Ok(utility::cu_for_new_child(&self.arena, parent, instance))
    }

    /// Utility of `parent` if `best1` and `best2` were merged around `instance`.
    pub fn cu_for_merge(
        &self,
        parent: ConceptId,
        best1: ConceptId,
        best2: ConceptId,
        instance: &Instance,
    ) -> CobwebResult<f64> {
        self.require_child(parent, best1)?;
        self.require_child(parent, best2)?;
        Ok(utility::cu_for_merge(
            &self.arena,
            parent,
            best1,
            best2,
            instance,
        ))
    }

    /// Utility of `parent` if `child` were split away. Exposed for external
    /// clustering drivers choosing which node to split next.
    pub fn cu_for_split(&self, parent: ConceptId, child: ConceptId) -> CobwebResult<f64> {
        self.require_child(parent, child)?;
        Ok(utility::cu_for_split(&self.arena, parent, child))
    }

    /// Utility of a leaf if it were promoted into a two-child subtree.
    pub fn cu_for_fringe_split(&self, leaf: ConceptId, instance: &Instance) -> CobwebResult<f64> {
        self.arena.try_get(leaf)?;
        Ok(utility::cu_for_fringe_split(&self.arena, leaf, instance))
    }

    /// P(attr = value) at the given concept; 0.0 for unseen pairs.
    pub fn get_probability(
        &self,
        id: ConceptId,
        attr: &str,
        value: &AttrValue,
    ) -> CobwebResult<f64> {
        Ok(self.arena.try_get(id)?.probability(attr, value))
    }

    /// Remove `child` and re-parent its children directly under `parent`.
    /// Exposed for external iterative-clustering drivers.
    pub fn split(&mut self, parent: ConceptId, child: ConceptId) -> CobwebResult<()> {
        self.require_child(parent, child)?;
        self.split_unchecked(parent, child);
        Ok(())
    }

    /// Check count conservation for every internal node: total count and
    /// every attribute/value pair must equal the sum over the children.
    pub fn verify_counts(&self) -> Result<(), TreeError> {
        self.verify_node(self.root)
    }

    fn verify_node(&self, id: ConceptId) -> Result<(), TreeError> {
        let node = self.arena.node(id);
        if node.is_leaf() {
            return Ok(());
        }

        let child_sum: u64 = node
            .children
            .iter()
            .map(|&c| self.arena.node(c).count())
            .sum();
        if child_sum != node.count() {
            return Err(TreeError::CountMismatch {
                concept: id,
                node_count: node.count(),
                child_sum,
            });
        }

        for (attr, values) in node.stats.iter() {
            for (value, &node_count) in values {
                let pair_sum: u64 = node
                    .children
                    .iter()
                    .map(|&c| self.arena.node(c).stats.get(attr, value))
                    .sum();
                if pair_sum != node_count {
                    return Err(TreeError::AttributeCountMismatch {
                        concept: id,
                        attribute: attr.clone(),
                        value: value.to_string(),
                        node_count,
                        child_sum: pair_sum,
                    });
                }
            }
        }

        // Children must not carry pairs the parent lacks.
        for &c in &node.children {
            let child = self.arena.node(c);
            for (attr, values) in child.stats.iter() {
                for (value, &n) in values {
                    if n > 0 && node.stats.get(attr, value) == 0 {
                        return Err(TreeError::AttributeCountMismatch {
                            concept: id,
                            attribute: attr.clone(),
                            value: value.to_string(),
                            node_count: 0,
                            child_sum: n,
                        });
                    }
                }
            }
        }

        for &c in &node.children {
            self.verify_node(c)?;
        }
        Ok(())
    }

    fn require_child(&self, parent: ConceptId, child: ConceptId) -> CobwebResult<()> {
        self.arena.try_get(parent)?;
        self.arena.try_get(child)?;
        if !self.arena.node(parent).children.contains(&child) {
            return Err(TreeError::NotAChild { parent, child }.into());
        }
        Ok(())
    }

    /// New child of `parent` holding only `instance`.
    fn create_new_child(&mut self, parent: ConceptId, instance: &Instance) -> ConceptId {
        let child = self.arena.alloc(Some(parent));
        self.arena.node_mut(child).stats.increment(instance);
        self.arena.node_mut(parent).children.push(child);
        child
    }

    /// New child of `parent` initialized with the parent's current counts.
    /// Returns `None` when the parent has absorbed nothing yet.
    fn create_child_with_current_counts(&mut self, parent: ConceptId) -> Option<ConceptId> {
        if self.arena.node(parent).count() == 0 {
            return None;
        }
        let child = self.arena.alloc(Some(parent));
        let stats = self.arena.node(parent).stats.clone();
        self.arena.node_mut(child).stats = stats;
        self.arena.node_mut(parent).children.push(child);
        Some(child)
    }

    /// Replace children `a` and `b` of `parent` with a fresh node combining
    /// their counts and holding both as its children.
    pub(crate) fn merge_children(
        &mut self,
        parent: ConceptId,
        a: ConceptId,
        b: ConceptId,
    ) -> ConceptId {
        let merged = self.arena.alloc(Some(parent));
        let mut stats = self.arena.node(a).stats.clone();
        stats.merge_from(&self.arena.node(b).stats);

        let merged_node = self.arena.node_mut(merged);
        merged_node.stats = stats;
        merged_node.children = vec![a, b];

        self.arena.node_mut(a).parent = Some(merged);
        self.arena.node_mut(b).parent = Some(merged);

        let parent_node = self.arena.node_mut(parent);
        parent_node.children.retain(|&c| c != a && c != b);
        parent_node.children.push(merged);
        merged
    }

    /// Remove `child`, promote its children under `parent`, and drop its
    /// arena slot. Counts are conserved: the promoted children carry exactly
    /// the statistics the removed node aggregated.
    fn split_unchecked(&mut self, parent: ConceptId, child: ConceptId) {
        let removed = self.arena.detach(child);
        let parent_node = self.arena.node_mut(parent);
        parent_node.children.retain(|&c| c != child);
        parent_node.children.extend(removed.children.iter().copied());
        for &grandchild in &removed.children {
            self.arena.node_mut(grandchild).parent = Some(parent);
        }
        debug!(parent = %parent, removed = %child, "split child");
    }

    /// Detach every descendant, turning `id` into a leaf.
    fn prune_children(&mut self, id: ConceptId) {
        let children = std::mem::take(&mut self.arena.node_mut(id).children);
        for child in children {
            self.prune_subtree(child);
        }
    }

    fn prune_subtree(&mut self, id: ConceptId) {
        let node = self.arena.detach(id);
        for child in node.children {
            self.prune_subtree(child);
        }
    }
}
