use super::OrderError;
use serde::{Deserialize, Serialize};

/// Numeric representation of a collection's order field.
///
/// `Decimal` columns are handled with `f64` arithmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
}

impl OrderKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
        }
    }

    /// Whether values of this kind are stored with the `other` representation.
    #[must_use]
    pub fn stored_as(&self, other: OrderKind) -> bool {
        matches!(
            (self, other),
            (Self::Decimal | Self::Float64, OrderKind::Float64 | OrderKind::Decimal)
        ) || *self == other
    }
}

impl std::str::FromStr for OrderKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "int32" | "int" | "integer" => Ok(Self::Int32),
            "int64" | "long" => Ok(Self::Int64),
            "float32" | "float" | "single" => Ok(Self::Float32),
            "float64" | "double" => Ok(Self::Float64),
            "decimal" => Ok(Self::Decimal),
            _ => Err(OrderError::UnsupportedKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
