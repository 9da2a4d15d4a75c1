//! Shared domain types for Builderbook.
//!
//! This crate contains the core domain types used across the registry:
//! identities, builder flags, curator entries, events, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod curator;
pub mod error;
pub mod event;
pub mod flags;
pub mod identity;
