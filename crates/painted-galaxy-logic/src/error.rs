//! Errors raised when constructing model values.

use std::fmt;

/// A model invariant was violated at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Nebulas must have a strictly positive radius.
    NonPositiveRadius(i64),
    /// Project names must not be empty.
    EmptyProjectName,
    /// A pixel buffer does not match its declared dimensions.
    PixelBufferSize { expected: usize, found: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NonPositiveRadius(r) => {
                write!(f, "Nebula radius must be positive, got {}", r)
            }
            ModelError::EmptyProjectName => write!(f, "Project name must not be empty"),
            ModelError::PixelBufferSize { expected, found } => write!(
                f,
                "Pixel buffer size mismatch: expected {} bytes, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ModelError {}
