//! Event bus for the registry's observable side channel.
//!
//! Provides an [`EventBus`] that distributes [`RegistryEvent`] messages to
//! all subscribers via a `tokio::sync::broadcast` channel.
//!
//! [`RegistryEvent`]: builderbook_types::event::RegistryEvent

pub mod bus;

pub use bus::EventBus;
