//! Error types for isomesh_rs operations.

use isomesh_core::IsomeshCoreError;
use thiserror::Error;

/// Errors that can occur while extracting meshes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsomeshError {
    /// The polygonizer configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] IsomeshCoreError),

    /// A multi-region extraction was asked for with no query points.
    #[error("no query points given for region extraction")]
    EmptyBatch,
}

/// Result type alias for isomesh_rs operations.
pub type Result<T> = core::result::Result<T, IsomeshError>;
