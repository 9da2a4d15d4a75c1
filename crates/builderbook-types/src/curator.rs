use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directory entry for one registered curator.
///
/// The metadata payload is opaque to the registry: it is stored and returned
/// verbatim, never parsed. Existence of the entry is what makes an identity a
/// curator; there is no separate enabled/disabled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratorEntry {
    /// Opaque metadata handle supplied by the owner (e.g. a URL or JSON blob).
    pub metadata: String,
    /// When the curator was registered.
    pub registered_at: DateTime<Utc>,
    /// When the metadata was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl CuratorEntry {
    /// Create a fresh entry stamped with the current time.
    pub fn new(metadata: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            metadata: metadata.into(),
            registered_at: now,
            updated_at: now,
        }
    }
}
