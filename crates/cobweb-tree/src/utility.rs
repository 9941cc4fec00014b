//! Category utility and copy-based hypothetical-edit evaluation.
//!
//! Every candidate structural edit is scored by building a throwaway
//! parent-plus-children shape, applying the edit to the copy, and reading the
//! resulting category utility. Nothing here mutates the real tree. The copies
//! are shallow on purpose: utility only ever looks at a parent and one level
//! of children, so grandchildren never need to be cloned.

use cobweb_core::{ConceptId, Instance, TreeError};

use crate::arena::NodeArena;
use crate::counts::ConceptStats;

/// A structural edit the driver can apply at one level of the descent.
///
/// Declaration order is the tie-break priority: when two candidates score
/// exactly equal utility, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    /// Insert the instance into the best-matching child.
    Best,
    /// Create a new child holding only the instance.
    New,
    /// Merge the two best children under a fresh node.
    Merge,
    /// Remove the best child and promote its children.
    Split,
}

/// Throwaway parent-plus-children shape used to score a hypothetical edit.
#[derive(Debug, Default)]
struct Hypothetical {
    stats: ConceptStats,
    children: Vec<ConceptStats>,
}

impl Hypothetical {
    fn from_node(arena: &NodeArena, id: ConceptId) -> Self {
        let node = arena.node(id);
        Self {
            stats: node.stats.clone(),
            children: node
                .children
                .iter()
                .map(|&c| arena.node(c).stats.clone())
                .collect(),
        }
    }

    fn category_utility(&self) -> f64 {
        utility_over(&self.stats, &self.children)
    }
}

/// (1/k) · Σ P(child) · (ECG(child) − ECG(parent)), or 0.0 with no children.
fn utility_over(parent: &ConceptStats, children: &[ConceptStats]) -> f64 {
    if children.is_empty() {
        return 0.0;
    }
    let parent_ecg = parent.expected_correct_guesses();
    let total = parent.count() as f64;
    let sum: f64 = children
        .iter()
        .map(|child| {
            let p_of_child = child.count() as f64 / total;
            p_of_child * (child.expected_correct_guesses() - parent_ecg)
        })
        .sum();
    sum / children.len() as f64
}

/// Category utility of a real node's current division into children.
pub fn category_utility(arena: &NodeArena, id: ConceptId) -> f64 {
    let node = arena.node(id);
    if node.children.is_empty() {
        return 0.0;
    }
    let parent_ecg = node.stats.expected_correct_guesses();
    let total = node.count() as f64;
    let sum: f64 = node
        .children
        .iter()
        .map(|&c| {
            let child = arena.node(c);
            (child.count() as f64 / total)
                * (child.stats.expected_correct_guesses() - parent_ecg)
        })
        .sum();
    sum / node.children.len() as f64
}

/// Utility of the parent after adding `instance` to the given existing child.
pub fn cu_for_insert(
    arena: &NodeArena,
    parent: ConceptId,
    child: ConceptId,
    instance: &Instance,
) -> f64 {
    let node = arena.node(parent);
    let mut stats = node.stats.clone();
    stats.increment(instance);
    let children = node
        .children
        .iter()
        .map(|&c| {
            let mut child_stats = arena.node(c).stats.clone();
            if c == child {
                child_stats.increment(instance);
            }
            child_stats
        })
        .collect();
    Hypothetical { stats, children }.category_utility()
}

/// Utility of the parent after creating a new child holding only `instance`.
pub fn cu_for_new_child(arena: &NodeArena, parent: ConceptId, instance: &Instance) -> f64 {
    let mut hypo = Hypothetical::from_node(arena, parent);
    hypo.stats.increment(instance);
    hypo.children.push(ConceptStats::from_instance(instance));
    hypo.category_utility()
}

/// Utility of the parent after combining `best1` and `best2` into one child
/// that also absorbs `instance`. All other children are left unchanged.
pub fn cu_for_merge(
    arena: &NodeArena,
    parent: ConceptId,
    best1: ConceptId,
    best2: ConceptId,
    instance: &Instance,
) -> f64 {
    let node = arena.node(parent);
    let mut stats = node.stats.clone();
    stats.increment(instance);

    let mut merged = arena.node(best1).stats.clone();
    merged.merge_from(&arena.node(best2).stats);
    merged.increment(instance);

    let mut children = vec![merged];
    for &c in &node.children {
        if c == best1 || c == best2 {
            continue;
        }
        children.push(arena.node(c).stats.clone());
    }
    Hypothetical { stats, children }.category_utility()
}

/// Utility of the parent after removing `best` and promoting its children.
/// Historically disjoint from the rest of the insertion decision: `instance`
/// is not part of the copy.
pub fn cu_for_split(arena: &NodeArena, parent: ConceptId, best: ConceptId) -> f64 {
    let node = arena.node(parent);
    let mut children: Vec<ConceptStats> = node
        .children
        .iter()
        .filter(|&&c| c != best)
        .map(|&c| arena.node(c).stats.clone())
        .collect();
    for &grandchild in &arena.node(best).children {
        children.push(arena.node(grandchild).stats.clone());
    }
    Hypothetical {
        stats: node.stats.clone(),
        children,
    }
    .category_utility()
}

/// Utility of the degenerate leaf case: push the leaf's counts into a new
/// child, then add `instance` as a second sibling. Scores whether the leaf
/// should stay a leaf (near-identical instances) or grow into a subtree.
pub fn cu_for_fringe_split(arena: &NodeArena, leaf: ConceptId, instance: &Instance) -> f64 {
    let node = arena.node(leaf);
    let mut hypo = Hypothetical {
        stats: node.stats.clone(),
        children: Vec::new(),
    };
    // An empty leaf has nothing to demote.
    if node.count() > 0 {
        hypo.children.push(node.stats.clone());
    }
    hypo.stats.increment(instance);
    hypo.children.push(ConceptStats::from_instance(instance));
    hypo.category_utility()
}

/// All children ranked by `cu_for_insert`, best first. Stable on ties, so
/// equal-utility children keep their sibling order.
pub(crate) fn rank_children(
    arena: &NodeArena,
    parent: ConceptId,
    instance: &Instance,
) -> Vec<(f64, ConceptId)> {
    let mut scored: Vec<(f64, ConceptId)> = arena
        .node(parent)
        .children
        .iter()
        .map(|&c| (cu_for_insert(arena, parent, c, instance), c))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

/// The two best children to receive `instance`, by insert utility.
/// The second entry is `None` when the node has a single child.
pub fn two_best_children(
    arena: &NodeArena,
    parent: ConceptId,
    instance: &Instance,
) -> Result<((f64, ConceptId), Option<(f64, ConceptId)>), TreeError> {
    if arena.node(parent).children.is_empty() {
        return Err(TreeError::NoChildren { concept: parent });
    }
    let ranked = rank_children(arena, parent, instance);
    Ok((ranked[0], ranked.get(1).copied()))
}

/// Score the candidate operations at `parent` and return the winner.
///
/// Merge is only eligible with more than two children and a second-best
/// child; split only when the best child has children of its own. On an
/// exact utility tie the earliest candidate in construction order wins
/// (Best > New > Merge > Split).
pub fn get_best_operation(
    arena: &NodeArena,
    parent: ConceptId,
    instance: &Instance,
    best1: (f64, ConceptId),
    best2: Option<(f64, ConceptId)>,
) -> (f64, Operation) {
    let mut candidates = vec![
        (best1.0, Operation::Best),
        (cu_for_new_child(arena, parent, instance), Operation::New),
    ];
    if arena.node(parent).children.len() > 2 {
        if let Some((_, second)) = best2 {
            candidates.push((
                cu_for_merge(arena, parent, best1.1, second, instance),
                Operation::Merge,
            ));
        }
    }
    if !arena.node(best1.1).children.is_empty() {
        candidates.push((cu_for_split(arena, parent, best1.1), Operation::Split));
    }

    let mut winner = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 > winner.0 {
            winner = candidate;
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobweb_core::Instance;

    fn instance(color: &str) -> Instance {
        Instance::new().with("color", color)
    }

    /// Root with one leaf child per given color.
    fn flat_tree(colors: &[&str]) -> (NodeArena, ConceptId) {
        let mut arena = NodeArena::new();
        let root = arena.alloc(None);
        for color in colors {
            let child = arena.alloc(Some(root));
            arena.node_mut(child).stats.increment(&instance(color));
            arena.node_mut(root).children.push(child);
            arena.node_mut(root).stats.increment(&instance(color));
        }
        (arena, root)
    }

    #[test]
    fn childless_utility_is_zero() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(None);
        assert_eq!(category_utility(&arena, root), 0.0);
    }

    #[test]
    fn perfectly_separated_children_score_positive() {
        let (arena, root) = flat_tree(&["red", "blue"]);
        // Parent ECG = 1/2, each child ECG = 1: cu = (1/2)·(2·(1/2)·(1/2)) = 1/4.
        assert!((category_utility(&arena, root) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn two_best_children_ranks_matching_child_first() {
        let (arena, root) = flat_tree(&["red", "blue"]);
        let ((_, best), second) = two_best_children(&arena, root, &instance("red")).unwrap();
        assert_eq!(best, arena.node(root).children[0]);
        assert!(second.is_some());
    }

    #[test]
    fn two_best_children_fails_on_leaf() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(None);
        assert!(matches!(
            two_best_children(&arena, root, &instance("red")),
            Err(TreeError::NoChildren { .. })
        ));
    }

    #[test]
    fn single_child_yields_no_second_best() {
        let (arena, root) = flat_tree(&["red"]);
        let (_, second) = two_best_children(&arena, root, &instance("red")).unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn merging_identical_children_does_not_hurt() {
        // Three children with identical single-attribute distributions.
        let (arena, root) = flat_tree(&["red", "red", "red"]);
        let (best1, best2) = two_best_children(&arena, root, &instance("red")).unwrap();
        let separate = cu_for_insert(&arena, root, best1.1, &instance("red"));
        let merged = cu_for_merge(&arena, root, best1.1, best2.unwrap().1, &instance("red"));
        assert!(merged >= separate);
    }

    #[test]
    fn fringe_split_of_identical_instance_scores_zero() {
        let mut arena = NodeArena::new();
        let leaf = arena.alloc(None);
        arena.node_mut(leaf).stats.increment(&instance("red"));
        assert!(cu_for_fringe_split(&arena, leaf, &instance("red")).abs() < 1e-12);
    }

    #[test]
    fn fringe_split_of_differing_instance_scores_positive() {
        let mut arena = NodeArena::new();
        let leaf = arena.alloc(None);
        arena.node_mut(leaf).stats.increment(&instance("red"));
        assert!(cu_for_fringe_split(&arena, leaf, &instance("blue")) > 0.0);
    }

    #[test]
    fn tie_break_prefers_earliest_operation() {
        // Force an exact tie by construction: with a single child holding the
        // identical distribution, inserting and creating a new child can only
        // be compared through the explicit priority when utilities collide.
        let (arena, root) = flat_tree(&["red"]);
        let (best1, best2) = two_best_children(&arena, root, &instance("red")).unwrap();
        let (_, op) = get_best_operation(&arena, root, &instance("red"), best1, best2);
        // cu_for_insert here equals 0.0 and cu_for_new_child is 0.0 as well;
        // Best is declared first, so Best must win.
        assert_eq!(op, Operation::Best);
    }

    #[test]
    fn split_is_only_offered_for_internal_best_child() {
        let (arena, root) = flat_tree(&["red", "blue", "green"]);
        let (best1, best2) = two_best_children(&arena, root, &instance("red")).unwrap();
        let (_, op) = get_best_operation(&arena, root, &instance("red"), best1, best2);
        // All children are leaves, so split can never be the winner here.
        assert_ne!(op, Operation::Split);
    }
}
