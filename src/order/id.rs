use super::OrderError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an item in an ordered collection.
///
/// Reorder requests carry ids as strings; they are parsed into the
/// collection's id type with [`ItemId::parse_id`].
pub trait ItemId:
    Ord + Hash + Clone + fmt::Debug + fmt::Display + FromStr + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Short name of the id type used in error messages.
    const TYPE_NAME: &'static str;
    const ID_KIND: IdKind;

    fn parse_id(raw: &str) -> Result<Self, OrderError> {
        raw.parse::<Self>()
            .map_err(|_| OrderError::conversion(raw, Self::TYPE_NAME))
    }
}

impl ItemId for i32 {
    const TYPE_NAME: &'static str = "i32";
    const ID_KIND: IdKind = IdKind::Integer;
}

impl ItemId for i64 {
    const TYPE_NAME: &'static str = "i64";
    const ID_KIND: IdKind = IdKind::Integer;
}

impl ItemId for u64 {
    const TYPE_NAME: &'static str = "u64";
    const ID_KIND: IdKind = IdKind::Integer;
}

impl ItemId for String {
    const TYPE_NAME: &'static str = "string";
    const ID_KIND: IdKind = IdKind::String;
}

impl ItemId for Uuid {
    const TYPE_NAME: &'static str = "uuid";
    const ID_KIND: IdKind = IdKind::Uuid;
}

/// Id representation declared by a collection file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Integer,
    String,
    Uuid,
}

impl IdKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Uuid => "uuid",
        }
    }
}

impl FromStr for IdKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "integer" | "int" | "long" => Ok(Self::Integer),
            "string" | "text" => Ok(Self::String),
            "uuid" | "guid" => Ok(Self::Uuid),
            _ => Err(OrderError::UnsupportedIdKind(s.to_string())),
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
