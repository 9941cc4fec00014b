//! Sufficient statistics for one concept.

use std::collections::BTreeMap;

use cobweb_core::{AttrValue, Instance};

/// Instance count plus per-attribute value counts for one concept.
///
/// This is the unit the hypothetical-edit evaluators clone: scoring a
/// candidate operation only ever needs the statistics of a parent and one
/// level of children, never the full subtree. `BTreeMap` keeps iteration
/// deterministic so tie-breaks are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptStats {
    count: u64,
    av_counts: BTreeMap<String, BTreeMap<AttrValue, u64>>,
}

impl ConceptStats {
    /// Empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics holding exactly one instance.
    pub fn from_instance(instance: &Instance) -> Self {
        let mut stats = Self::default();
        stats.increment(instance);
        stats
    }

    /// Number of instances absorbed here or below.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Absorb one instance: bump the total and every attribute/value pair.
    /// Unknown attributes and values are simply added.
    pub fn increment(&mut self, instance: &Instance) {
        self.count += 1;
        for (attr, value) in instance.iter() {
            *self
                .av_counts
                .entry(attr.clone())
                .or_default()
                .entry(value.clone())
                .or_insert(0) += 1;
        }
    }

    /// Add all of `other`'s counts into self, element-wise.
    pub fn merge_from(&mut self, other: &ConceptStats) {
        self.count += other.count;
        for (attr, values) in &other.av_counts {
            let table = self.av_counts.entry(attr.clone()).or_default();
            for (value, n) in values {
                *table.entry(value.clone()).or_insert(0) += n;
            }
        }
    }

    /// Σ over all attribute/value pairs of (count/total)².
    ///
    /// The expected number of correct guesses from a strategy that guesses
    /// each attribute's value proportionally to observed frequency. This is
    /// the core term of the category-utility objective.
    pub fn expected_correct_guesses(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let total = self.count as f64;
        self.av_counts
            .values()
            .flat_map(|table| table.values())
            .map(|&n| {
                let p = n as f64 / total;
                p * p
            })
            .sum()
    }

    /// P(attr = value) at this concept; 0.0 for unseen pairs.
    pub fn probability(&self, attr: &str, value: &AttrValue) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        match self.av_counts.get(attr).and_then(|table| table.get(value)) {
            Some(&n) => n as f64 / self.count as f64,
            None => 0.0,
        }
    }

    /// Raw count for one attribute/value pair (0 if unseen).
    pub fn get(&self, attr: &str, value: &AttrValue) -> u64 {
        self.av_counts
            .get(attr)
            .and_then(|table| table.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over attributes and their value-count tables in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<AttrValue, u64>)> {
        self.av_counts.iter()
    }
}
