//! Registry logic for Builderbook.
//!
//! The registry is a multi-tenant directory of builder records: a single
//! owner grants curator status, each curator publishes boolean-attribute
//! records about builders inside its own namespace, and anyone can read or
//! filter a namespace. This crate holds the whole of that logic -- access
//! control, the curator directory, the per-curator indexed builder sets, the
//! flag-equality filter engine, and the [`Registry`] facade tying them
//! together. It depends only on `builderbook-types`; there is no I/O here.
//!
//! All state lives in an explicit [`Registry`] value that callers own and
//! pass around -- no ambient singletons. Mutations take `&mut self`, so call
//! serialization is structural rather than lock-based.

pub mod access;
pub mod builders;
pub mod directory;
pub mod event;
pub mod filter;
pub mod registry;

pub use access::AccessControl;
pub use builders::BuilderSet;
pub use directory::CuratorDirectory;
pub use event::EventBus;
pub use registry::Registry;
