//! # landwatch-database
//!
//! PostgreSQL connection management, migrations, and the source adapters
//! that feed the alert engine: a `PgSource` per table (with LISTEN-based
//! insert subscriptions) and an in-process `MemorySource` with the same
//! contract.

pub mod connection;
pub mod migration;
pub mod sources;

pub use connection::DatabasePool;
pub use sources::{MemorySource, PgSource, SourceSet};
