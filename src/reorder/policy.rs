use serde::{Deserialize, Serialize};

/// How a reorder request interacts with the values already in the collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UserRequestPrecedence {
    /// Unordered items are initialized first, then requested values are
    /// written as given. A requested value may end up shared with an item
    /// outside the request.
    Overwrite,
    /// Requested values are moved off values held by items outside the
    /// request, keeping every order value in the collection unique.
    #[default]
    ConflictAvoid,
}

impl UserRequestPrecedence {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::ConflictAvoid => "conflict-avoid",
        }
    }
}

impl std::str::FromStr for UserRequestPrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "conflict-avoid" | "conflictavoid" => Ok(Self::ConflictAvoid),
            _ => Err(format!("Invalid precedence: {s}")),
        }
    }
}

impl std::fmt::Display for UserRequestPrecedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunables for a [`super::Reconciler`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct ReconcilerSettings {
    pub precedence: UserRequestPrecedence,
    /// Treat an order value of zero as missing.
    pub treat_zero_as_unset: bool,
}
