use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a concept node.
///
/// Allocated monotonically by the tree's arena and never reused, so a
/// `ConceptId` held by an external caller stays unambiguous even after the
/// node it named has been split away or merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptId(u64);

impl ConceptId {
    /// Wrap a raw allocator value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw allocator value.
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Arena slot index for this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Concept{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_concept_name() {
        assert_eq!(ConceptId::new(7).to_string(), "Concept7");
    }
}
