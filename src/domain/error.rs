//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::scene::NodeId;

/// Domain errors represent violations of the scene's structural rules.
/// These are independent of rendering and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: f64 },

    #[error("cycle detected: node {child} cannot be added below {parent}")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node is not a composite: {0}")]
    NotAComposite(NodeId),

    #[error("node {child} already belongs to composite {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
