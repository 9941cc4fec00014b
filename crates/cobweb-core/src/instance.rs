use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::id::ConceptId;

/// One observed attribute value.
///
/// Values are opaque, ordered, hashable tokens: symbols and integers cover
/// ordinary categorical data, and `Concept` references another node in the
/// tree (the hook structural-matching extensions hang instances off of).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttrValue {
    Symbol(String),
    Integer(i64),
    Concept(ConceptId),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Symbol(s) => write!(f, "{s}"),
            AttrValue::Integer(n) => write!(f, "{n}"),
            AttrValue::Concept(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Symbol(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Symbol(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Integer(value)
    }
}

impl From<ConceptId> for AttrValue {
    fn from(value: ConceptId) -> Self {
        AttrValue::Concept(value)
    }
}

/// One instance: a mapping from attribute name to observed value.
///
/// Backed by a `BTreeMap` so iteration order is deterministic, which keeps
/// tie-breaking in the tree reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance(BTreeMap<String, AttrValue>);

impl Instance {
    /// Create an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, attr: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.0.insert(attr.into(), value.into());
        self
    }

    /// Set an attribute value.
    pub fn set(&mut self, attr: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(attr.into(), value.into());
    }

    /// Look up an attribute value.
    pub fn get(&self, attr: &str) -> Option<&AttrValue> {
        self.0.get(attr)
    }

    /// A copy of this instance with one attribute removed.
    /// Used by flexible prediction to withhold the attribute under test.
    pub fn without(&self, attr: &str) -> Instance {
        let mut copy = self.clone();
        copy.0.remove(attr);
        copy
    }

    /// Iterate over attribute/value pairs in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }

    /// Iterate over attribute names in order.
    pub fn attrs(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the instance has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AttrValue)> for Instance {
    fn from_iter<I: IntoIterator<Item = (String, AttrValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
