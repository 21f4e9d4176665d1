use thiserror::Error;

use crate::ObjectId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("object #{0} not found")]
    NotFound(ObjectId),

    #[error("maximum distance to consider must be a finite non-negative number, got {0}")]
    InvalidDistance(f32),

    #[error("maximum number of frames per object must be 0 (unbounded) or at least 2, got {0}")]
    InvalidHistoryCap(usize),
}
