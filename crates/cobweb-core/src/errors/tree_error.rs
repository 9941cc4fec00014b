use crate::id::ConceptId;

/// Concept tree errors. All of these are contract violations that propagate
/// to the caller; none are transient or retried.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("concept {concept} has no children")]
    NoChildren { concept: ConceptId },

    #[error("unknown or detached concept: {concept}")]
    UnknownConcept { concept: ConceptId },

    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: ConceptId, child: ConceptId },

    #[error("count mismatch at {concept}: node {node_count}, children sum {child_sum}")]
    CountMismatch {
        concept: ConceptId,
        node_count: u64,
        child_sum: u64,
    },

    #[error(
        "count mismatch at {concept} for {attribute} = {value}: node {node_count}, children sum {child_sum}"
    )]
    AttributeCountMismatch {
        concept: ConceptId,
        attribute: String,
        value: String,
        node_count: u64,
        child_sum: u64,
    },
}
