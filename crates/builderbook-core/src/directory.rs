//! Curator directory: which identities may publish builder records.
//!
//! Maps curator identity to a [`CuratorEntry`] holding the opaque metadata
//! payload. Membership in this map is the single source of truth for the
//! curator role. Mutation rights are enforced by the [`Registry`] facade
//! through [`AccessControl`](crate::access::AccessControl) before any of the
//! mutating methods here run.
//!
//! [`Registry`]: crate::registry::Registry

use std::collections::HashMap;

use builderbook_types::curator::CuratorEntry;
use builderbook_types::error::RegistryError;
use builderbook_types::identity::AccountId;
use chrono::Utc;

/// In-memory curator directory.
///
/// Removing an entry does not cascade into the curator's builder set; that
/// data stays intact and queryable (an explicit contract, not an oversight).
#[derive(Debug, Clone, Default)]
pub struct CuratorDirectory {
    entries: HashMap<AccountId, CuratorEntry>,
}

impl CuratorDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is a registered curator. Pure predicate.
    pub fn is_curator(&self, id: AccountId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Look up a curator's entry.
    pub fn get(&self, id: AccountId) -> Option<&CuratorEntry> {
        self.entries.get(&id)
    }

    /// Number of registered curators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no curators are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a new curator with its opaque metadata.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `curator` is the null identity; `AlreadyExists`
    /// if the curator is already registered.
    pub fn register(
        &mut self,
        curator: AccountId,
        metadata: impl Into<String>,
    ) -> Result<&CuratorEntry, RegistryError> {
        if curator.is_nil() {
            return Err(RegistryError::InvalidArgument("curator identity is nil"));
        }
        if self.entries.contains_key(&curator) {
            return Err(RegistryError::AlreadyExists(curator));
        }
        Ok(self
            .entries
            .entry(curator)
            .or_insert_with(|| CuratorEntry::new(metadata)))
    }

    /// Replace a curator's metadata in place.
    ///
    /// # Errors
    ///
    /// `NotFound` if the curator is not registered.
    pub fn update_metadata(
        &mut self,
        curator: AccountId,
        metadata: impl Into<String>,
    ) -> Result<&CuratorEntry, RegistryError> {
        let entry = self
            .entries
            .get_mut(&curator)
            .ok_or(RegistryError::NotFound("curator"))?;
        entry.metadata = metadata.into();
        entry.updated_at = Utc::now();
        Ok(entry)
    }

    /// Delete a curator's directory entry, returning it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the curator is not registered.
    pub fn unregister(&mut self, curator: AccountId) -> Result<CuratorEntry, RegistryError> {
        self.entries
            .remove(&curator)
            .ok_or(RegistryError::NotFound("curator"))
    }
}
