//! Error types shared by all filter operations.

use thiserror::Error;

/// Errors reported by buffer construction and filter invocations.
///
/// All operations are pure: on failure the caller's input is untouched and
/// no partial output exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Zero dimensions, inconsistent row stride, or a failed allocation.
    #[error("invalid pixel buffer: {reason}")]
    InvalidBuffer { reason: String },

    /// Histogram specification was invoked without a usable reference image.
    #[error("histogram specification requires a non-empty reference image")]
    MissingReference,

    /// A caller-supplied parameter is outside its documented range.
    #[error("parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

impl FilterError {
    pub(crate) fn invalid_buffer(reason: impl Into<String>) -> Self {
        FilterError::InvalidBuffer {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, value: f32) -> Self {
        FilterError::InvalidParameter { name, value }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
