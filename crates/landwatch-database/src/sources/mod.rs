//! Source adapter implementations.

pub mod memory;
pub mod postgres;
pub mod set;
pub mod table;

pub use memory::MemorySource;
pub use postgres::PgSource;
pub use set::SourceSet;
pub use table::SourceTable;
