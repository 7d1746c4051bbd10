//! Error types for pillarnms.

use thiserror::Error;

/// Result alias for pillarnms operations.
pub type Result<T> = std::result::Result<T, PillarNmsError>;

/// Errors reported by the box model, suppression engine and post-processor.
///
/// Degenerate geometry is never an error: zero-volume boxes simply overlap
/// nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PillarNmsError {
    /// The IoU threshold is NaN or outside `[0, 1]`.
    #[error("invalid IoU threshold {value}: expected a value in [0, 1]")]
    InvalidIouThreshold { value: f32 },
    /// The candidate cap must be at least one.
    #[error("invalid max output {value}: expected at least 1")]
    InvalidMaxOutput { value: usize },
    /// A retained box refers to a class the label list does not have.
    #[error("class id {class_id} out of range for {num_classes} class names")]
    ClassIdOutOfRange { class_id: u32, num_classes: usize },
    /// A raw record carries a class id that is not a non-negative integer.
    #[error("candidate {index}: class id {value} is not a non-negative integer")]
    InvalidClassId { index: usize, value: f32 },
    /// A candidate violates a box invariant.
    #[error("candidate {index}: {reason}")]
    InvalidCandidate { index: usize, reason: &'static str },
    /// A raw buffer length is not a whole number of records.
    #[error("buffer length {len} is not a multiple of the record stride {stride}")]
    InvalidBufferLength { len: usize, stride: usize },
    /// The reported candidate count does not fit in the buffer.
    #[error("buffer too small: needed {needed} values, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A class label is empty.
    #[error("class name {index} is empty")]
    EmptyClassName { index: usize },
}
