use thiserror::Error;

/// Errors raised while interpreting ids and order values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Failed to convert id '{id}' to type '{target}'")]
    Conversion { id: String, target: String },

    #[error("Order value {value} cannot be represented as {target}")]
    InvalidOrderValue { value: f64, target: String },

    #[error("Unsupported order kind '{0}'. Supported: int32, int64, float32, float64, decimal")]
    UnsupportedKind(String),

    #[error("Unsupported id kind '{0}'. Supported: integer, string, uuid")]
    UnsupportedIdKind(String),

    #[error("No free order value after {0}")]
    Overflow(String),
}

impl OrderError {
    /// Create a conversion error for an id that does not parse as `target`
    #[must_use]
    pub fn conversion(id: impl Into<String>, target: impl Into<String>) -> Self {
        OrderError::Conversion {
            id: id.into(),
            target: target.into(),
        }
    }
}
