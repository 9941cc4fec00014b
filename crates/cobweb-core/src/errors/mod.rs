mod tree_error;

pub use tree_error::TreeError;

/// Top-level error type for the Cobweb workspace.
#[derive(Debug, thiserror::Error)]
pub enum CobwebError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("empty collection: {context}")]
    EmptyCollection { context: String },
}

/// Convenience result alias used across the workspace.
pub type CobwebResult<T> = Result<T, CobwebError>;
