use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Identity of an account interacting with the registry, wrapping a UUID v7
/// (time-sortable).
///
/// The same identity space covers the owner, curators, and anonymous readers.
/// The nil UUID is the reserved "null identity": constructors never produce
/// it, and every operation rejects it with an `InvalidArgument` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Create a new AccountId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an AccountId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The reserved null identity. Rejected by every registry operation.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the reserved null identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identity of a builder described by a registry record.
///
/// Builders are external entities; they never call the registry themselves,
/// so their identity space is kept distinct from [`AccountId`] at the type
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuilderId(pub Uuid);

impl BuilderId {
    /// Create a new BuilderId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a BuilderId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The reserved null identity. Rejected by every registry operation.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the reserved null identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for BuilderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuilderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_id_is_not_nil() {
        assert!(!AccountId::new().is_nil());
    }

    #[test]
    fn nil_account_id_is_nil() {
        assert!(AccountId::nil().is_nil());
        assert_eq!(AccountId::nil(), AccountId::from_uuid(Uuid::nil()));
    }

    #[test]
    fn account_id_round_trips_through_display() {
        let id = AccountId::new();
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn builder_id_round_trips_through_serde() {
        let id = BuilderId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: BuilderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
