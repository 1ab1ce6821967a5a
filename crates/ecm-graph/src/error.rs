use thiserror::Error;

/// Errors returned by graph queries.
///
/// Construction never fails; the only failure is asking about a node the
/// graph has never seen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node identifier: {0}")]
    UnknownNode(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
