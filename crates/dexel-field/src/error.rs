//! Error types for nail field construction.

use thiserror::Error;

/// Errors that can occur while building a nail field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// The requested span and spacing need more nails than an index can address.
    #[error(
        "impossible to create {requested} nails, please reduce precision \
         (maximum number of nails: {max})"
    )]
    TooManyNails {
        /// Number of nails the request would need.
        requested: i64,
        /// Largest supported number of nails.
        max: i32,
    },

    /// No spacing/origin pair keeps the interior nails inside the borders.
    #[error("unable to snap nail board to borders (origin {origin}, size {size}, scaling {scaling})")]
    SnapToBorder {
        /// Requested origin.
        origin: f32,
        /// Requested world size.
        size: f32,
        /// Requested spacing.
        scaling: f32,
    },

    /// Grid settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Stock bounds are degenerate or not finite.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// Settings file could not be parsed.
    #[error("failed to parse settings: {0}")]
    Config(#[from] toml::de::Error),

    /// Settings could not be written.
    #[error("failed to write settings: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// Result type for nail field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
