use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier. Any string is a valid lookup key; freshly minted
/// ids are random v4 UUIDs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh, incomplete record. The title is taken as given; callers
    /// reject empty titles before getting here.
    pub fn new(title: impl Into<String>) -> Self {
        Self { id: TodoId::generate(), title: title.into(), completed: false, created_at: Utc::now() }
    }

    /// Checkbox rendering used by the list tool.
    pub fn checkbox(&self) -> &'static str { if self.completed { "[x]" } else { "[ ]" } }
}
