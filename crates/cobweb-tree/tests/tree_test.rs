//! Integration tests for the cobweb driver and its public surface.

use cobweb_core::{AttrValue, CobwebError, Instance};
use cobweb_tree::CobwebTree;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn color(value: &str) -> Instance {
    Instance::new().with("color", value)
}

// Two identical instances stay in the root leaf; the third, differing one
// triggers a fringe split. Root ends with count 3 and P(color=red) = 2/3.
#[test]
fn red_red_blue_scenario() {
    let mut tree = CobwebTree::new();
    tree.ifit(&color("red"));
    tree.ifit(&color("red"));
    tree.ifit(&color("blue"));

    let root = tree.root();
    let root_node = tree.node(root).unwrap();
    assert_eq!(root_node.count(), 3);
    assert!(root_node.children().len() >= 2);

    let p = tree
        .get_probability(root, "color", &AttrValue::from("red"))
        .unwrap();
    assert!((p - 2.0 / 3.0).abs() < 1e-12);
    tree.verify_counts().unwrap();
}

#[test]
fn counts_are_conserved_on_the_mushroom_stream() {
    let mut tree = CobwebTree::new();
    let instances = test_fixtures::mushrooms();
    for instance in &instances {
        tree.ifit(instance);
        tree.verify_counts().unwrap();
    }
    assert_eq!(
        tree.node(tree.root()).unwrap().count(),
        instances.len() as u64
    );
}

#[test]
fn categorize_is_idempotent_and_read_only() {
    let mut tree = CobwebTree::new();
    tree.fit(&test_fixtures::mushrooms());

    let probe = Instance::new().with("cap", "red").with("odor", "foul");
    let before = tree.to_json().unwrap();
    let first = tree.categorize(&probe);
    let second = tree.categorize(&probe);
    assert_eq!(first, second);
    assert!(tree.node(first).unwrap().is_leaf());
    assert_eq!(tree.to_json().unwrap(), before, "categorize must not mutate");
}

#[test]
fn every_ifit_lands_in_a_leaf() {
    let mut tree = CobwebTree::new();
    for instance in test_fixtures::mushrooms() {
        let fit = tree.ifit(&instance);
        assert!(tree.node(fit.node).unwrap().is_leaf());
    }
}

#[test]
fn two_best_children_errors_on_childless_root() {
    let tree = CobwebTree::new();
    let result = tree.two_best_children(tree.root(), &color("red"));
    assert!(result.is_err());
}

#[test]
fn probability_queries_on_unseen_pairs_return_zero() {
    let mut tree = CobwebTree::new();
    tree.fit(&test_fixtures::color_stream(6, &["red", "blue"]));
    let p = tree
        .get_probability(tree.root(), "color", &AttrValue::from("chartreuse"))
        .unwrap();
    assert_eq!(p, 0.0);
    let p = tree
        .get_probability(tree.root(), "smell", &AttrValue::from("sweet"))
        .unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn predict_fills_missing_attributes_from_the_leaf() {
    let mut tree = CobwebTree::new();
    tree.fit(&test_fixtures::two_clusters(8));

    let mut rng = StdRng::seed_from_u64(1);
    let prediction = tree.predict(&Instance::new().with("color", "red"), &mut rng);
    // Red instances are always small, so the sampled size is determined.
    assert_eq!(prediction.get("size"), Some(&AttrValue::from("small")));
    // Present attributes are never overwritten.
    assert_eq!(prediction.get("color"), Some(&AttrValue::from("red")));
}

#[test]
fn flexible_prediction_scores_separable_data_highly() {
    let mut tree = CobwebTree::new();
    tree.fit(&test_fixtures::two_clusters(10));

    let score = tree
        .flexible_prediction(&Instance::new().with("color", "red").with("size", "small"))
        .unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert!(score > 0.5, "separable clusters should predict well: {score}");
}

#[test]
fn flexible_prediction_of_empty_instance_is_an_error() {
    let tree = CobwebTree::new();
    assert!(matches!(
        tree.flexible_prediction(&Instance::new()),
        Err(CobwebError::EmptyCollection { .. })
    ));
}

#[test]
fn external_split_driver_queries_work() {
    let mut tree = CobwebTree::new();
    tree.fit(&test_fixtures::mushrooms());

    let root = tree.root();
    let root_cu = tree.category_utility(root).unwrap();
    assert!(root_cu > 0.0);

    // Choose the first internal child, the way an iterative clustering
    // driver would, and split it.
    let internal = tree
        .node(root)
        .unwrap()
        .children()
        .iter()
        .copied()
        .find(|&c| !tree.node(c).unwrap().is_leaf());
    if let Some(child) = internal {
        let promoted = tree.node(child).unwrap().children().len();
        let before = tree.node(root).unwrap().children().len();
        tree.cu_for_split(root, child).unwrap();
        tree.split(root, child).unwrap();
        assert_eq!(
            tree.node(root).unwrap().children().len(),
            before - 1 + promoted
        );
        assert!(tree.node(child).is_err(), "split node is detached");
        tree.verify_counts().unwrap();
    }
}

#[test]
fn remapped_ids_resolve_to_live_nodes() {
    let mut tree = CobwebTree::new();
    for instance in test_fixtures::mushrooms() {
        let fit = tree.ifit(&instance);
        for (&stale, &replacement) in &fit.remapped {
            // The demoted statistics live on in the replacement child.
            let node = tree.node(replacement).unwrap();
            assert_eq!(node.parent(), Some(stale));
        }
    }
}

#[test]
fn num_concepts_counts_every_node() {
    let mut tree = CobwebTree::new();
    assert_eq!(tree.num_concepts(), 1);
    tree.fit(&test_fixtures::color_stream(6, &["red", "blue", "green"]));
    let dump = tree.export();
    fn dump_size(dump: &cobweb_tree::ConceptDump) -> usize {
        1 + dump.children.iter().map(dump_size).sum::<usize>()
    }
    assert_eq!(tree.num_concepts(), dump_size(&dump));
}
