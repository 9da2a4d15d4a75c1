//! Owner role tracking and role checks.
//!
//! The registry has exactly one owner at a time. Every owner-gated operation
//! goes through [`AccessControl::require_owner`]; a denied check terminates
//! the call immediately with a typed error before any state is touched.

use builderbook_types::error::{RegistryError, Role};
use builderbook_types::identity::AccountId;

/// Holds the owner identity and answers role checks in O(1).
///
/// The owner is never nil after construction and changes only through
/// [`transfer`](Self::transfer), which the current owner alone may call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: AccountId,
}

impl AccessControl {
    /// Create access control with an initial owner.
    ///
    /// Returns `InvalidArgument` if `owner` is the null identity.
    pub fn new(owner: AccountId) -> Result<Self, RegistryError> {
        if owner.is_nil() {
            return Err(RegistryError::InvalidArgument("owner identity is nil"));
        }
        Ok(Self { owner })
    }

    /// The current owner.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Whether `id` is the current owner. Pure predicate, no side effects.
    pub fn is_owner(&self, id: AccountId) -> bool {
        self.owner == id
    }

    /// Fail with `Unauthorized` unless `caller` is the current owner.
    pub fn require_owner(&self, caller: AccountId) -> Result<(), RegistryError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller,
                required: Role::Owner,
            })
        }
    }

    /// Transfer the owner role to `new_owner`.
    ///
    /// Owner-only. Returns the previous owner on success so the caller can
    /// report the change.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `caller` is not the current owner; `InvalidArgument`
    /// if `new_owner` is the null identity.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<AccountId, RegistryError> {
        self.require_owner(caller)?;
        if new_owner.is_nil() {
            return Err(RegistryError::InvalidArgument("new owner identity is nil"));
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        Ok(previous)
    }
}
