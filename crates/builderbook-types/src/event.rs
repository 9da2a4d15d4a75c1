//! Event types for the registry event bus.
//!
//! `RegistryEvent` is the unified event type broadcast after each committed
//! mutation. All variants are Clone + Send + Sync for use with tokio
//! broadcast channels. Event content mirrors the state change exactly; a
//! call that fails a precondition emits nothing.

use serde::{Deserialize, Serialize};

use crate::flags::BuilderFlags;
use crate::identity::{AccountId, BuilderId};

/// Events emitted by the registry, consumed by external indexers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// The owner role moved to a new identity.
    OwnershipTransferred {
        previous: AccountId,
        new: AccountId,
    },

    /// A curator was registered by the owner.
    CuratorRegistered {
        curator: AccountId,
        metadata: String,
    },

    /// A curator's metadata was replaced.
    CuratorUpdated {
        curator: AccountId,
        metadata: String,
    },

    /// A curator's directory entry was removed.
    ///
    /// The curator's builder records survive and stay queryable.
    CuratorUnregistered { curator: AccountId },

    /// A builder record was created or overwritten. Carries the full
    /// resulting flag set.
    BuilderSet {
        curator: AccountId,
        builder: BuilderId,
        flags: BuilderFlags,
    },

    /// A builder record was removed from a curator's namespace.
    BuilderRemoved {
        curator: AccountId,
        builder: BuilderId,
    },
}
