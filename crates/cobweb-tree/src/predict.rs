//! Prediction helpers: value sampling and flexible prediction.

use std::collections::BTreeMap;

use cobweb_core::{stats, AttrValue, CobwebError, CobwebResult, Instance};
use rand::Rng;

use crate::tree::CobwebTree;

impl CobwebTree {
    /// Fill in attributes missing from `instance` by sampling, at the
    /// categorized leaf, each absent attribute's value proportionally to its
    /// observed count. The tree is not modified.
    pub fn predict<R: Rng + ?Sized>(&self, instance: &Instance, rng: &mut R) -> Instance {
        let mut prediction = instance.clone();
        let concept = self.categorize(instance);
        let node = self.arena.node(concept);
        for (attr, values) in node.stats.iter() {
            if prediction.get(attr).is_some() {
                continue;
            }
            if let Some(value) = sample_weighted(values, rng) {
                prediction.set(attr.clone(), value.clone());
            }
        }
        prediction
    }

    /// P(attr = value) at the concept `instance` categorizes into.
    pub fn concept_attr_value(&self, instance: &Instance, attr: &str, value: &AttrValue) -> f64 {
        let concept = self.categorize(instance);
        self.arena.node(concept).stats.probability(attr, value)
    }

    /// Fisher's flexible prediction task: for each attribute, withhold it,
    /// categorize the rest, and read off the probability assigned to the
    /// true value. Returns the average across attributes.
    pub fn flexible_prediction(&self, instance: &Instance) -> CobwebResult<f64> {
        if instance.is_empty() {
            return Err(CobwebError::EmptyCollection {
                context: "flexible_prediction".to_string(),
            });
        }
        let probs: Vec<f64> = instance
            .iter()
            .map(|(attr, value)| self.concept_attr_value(&instance.without(attr), attr, value))
            .collect();
        stats::mean(&probs)
    }
}

/// Pick a value with probability proportional to its count.
fn sample_weighted<'a, R: Rng + ?Sized>(
    values: &'a BTreeMap<AttrValue, u64>,
    rng: &mut R,
) -> Option<&'a AttrValue> {
    let total: u64 = values.values().sum();
    if total == 0 {
        return None;
    }
    let mut pick = rng.gen_range(0..total);
    for (value, &n) in values {
        if pick < n {
            return Some(value);
        }
        pick -= n;
    }
    None
}
