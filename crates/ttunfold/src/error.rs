//! Error types for ttunfold

use thiserror::Error;

use crate::mapping::UnfoldDir;
use crate::source::ElementType;
use crate::tensortrain::TrainKind;

/// Result type for ttunfold operations
pub type Result<T> = std::result::Result<T, UnfoldError>;

/// Errors that can occur while building or matricizing a tensor train
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnfoldError {
    /// No cores were supplied
    #[error("Tensor train is empty")]
    Empty,

    /// A core does not have exactly four modes
    #[error("Core '{key}' must have rank 4, got rank {rank}")]
    InvalidRank {
        /// Name of the offending array (empty when built directly)
        key: String,
        /// The rank that was found
        rank: usize,
    },

    /// Flat data length does not match the product of the shape
    #[error("Data length mismatch: shape requires {expected} elements, got {actual}")]
    DataLengthMismatch {
        /// Number of elements implied by the shape
        expected: usize,
        /// Number of elements provided
        actual: usize,
    },

    /// Element count of a shape does not fit in `usize`
    #[error("Shape {shape:?} has more elements than can be addressed")]
    ShapeOverflow {
        /// The rejected shape
        shape: [usize; 4],
    },

    /// Element type that cannot be represented without precision loss
    #[error("Array '{key}' has element type {dtype}, which is not supported")]
    UnsupportedElementType {
        /// Name of the offending array
        key: String,
        /// The rejected element type
        dtype: ElementType,
    },

    /// Unfold direction that does not belong to the train's kind
    #[error("Unfold direction {unfold} is not available for {kind} tensor trains")]
    UnsupportedUnfold {
        /// The requested direction
        unfold: UnfoldDir,
        /// The kind derived from the core shapes
        kind: TrainKind,
    },

    /// Name that does not match any unfold direction
    #[error("Unknown unfold direction '{0}'. Valid directions: IJ_K, JI_K, I_JK, I_KJ, IJ_KL")]
    UnknownUnfold(String),
}
