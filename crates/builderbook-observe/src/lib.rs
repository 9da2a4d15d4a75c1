//! Observability setup for Builderbook.
//!
//! The registry reports every committed mutation through `tracing`; this
//! crate installs the subscriber that renders those records.

pub mod tracing_setup;

pub use tracing_setup::init_tracing;
