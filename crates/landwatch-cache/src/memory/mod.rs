//! In-memory watermark store.

pub mod store;

pub use store::MemoryWatermarkStore;
