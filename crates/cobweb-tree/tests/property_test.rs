//! Randomized invariant checks over arbitrary categorical streams.

use cobweb_core::Instance;
use cobweb_tree::CobwebTree;
use proptest::prelude::*;

const ATTRS: [&str; 3] = ["color", "size", "shape"];
const VALUES: [&str; 4] = ["a", "b", "c", "d"];

/// An instance with 1..=3 attributes drawn from small fixed pools.
fn instance_strategy() -> impl Strategy<Value = Instance> {
    prop::collection::btree_map(
        prop::sample::select(&ATTRS[..]),
        prop::sample::select(&VALUES[..]),
        1..=ATTRS.len(),
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|(attr, value)| (attr.to_string(), value.into()))
            .collect()
    })
}

fn stream_strategy() -> impl Strategy<Value = Vec<Instance>> {
    prop::collection::vec(instance_strategy(), 1..40)
}

proptest! {
    #[test]
    fn counts_stay_conserved(instances in stream_strategy()) {
        let mut tree = CobwebTree::new();
        for instance in &instances {
            tree.ifit(instance);
            prop_assert!(tree.verify_counts().is_ok());
        }
        prop_assert_eq!(
            tree.node(tree.root()).unwrap().count(),
            instances.len() as u64
        );
    }

    #[test]
    fn ifit_always_returns_a_leaf(instances in stream_strategy()) {
        let mut tree = CobwebTree::new();
        for instance in &instances {
            let fit = tree.ifit(instance);
            prop_assert!(tree.node(fit.node).unwrap().is_leaf());
        }
    }

    #[test]
    fn categorize_is_idempotent(instances in stream_strategy(), probe in instance_strategy()) {
        let mut tree = CobwebTree::new();
        tree.fit(&instances);
        let snapshot = tree.to_json().unwrap();
        let first = tree.categorize(&probe);
        let second = tree.categorize(&probe);
        prop_assert_eq!(first, second);
        prop_assert_eq!(tree.to_json().unwrap(), snapshot);
    }

    #[test]
    fn committed_utility_is_never_negative_at_default_threshold(
        instances in stream_strategy()
    ) {
        // With min_cu = 0.0 the driver refuses edits that do not help, so a
        // node that keeps children must divide its instances no worse than
        // not dividing them at all.
        let mut tree = CobwebTree::new();
        tree.fit(&instances);
        fn check(tree: &CobwebTree, id: cobweb_core::ConceptId) -> bool {
            let node = tree.node(id).unwrap();
            if node.is_leaf() {
                return true;
            }
            tree.category_utility(id).unwrap() >= -1e-9
                && node.children().iter().all(|&c| check(tree, c))
        }
        prop_assert!(check(&tree, tree.root()));
    }
}
