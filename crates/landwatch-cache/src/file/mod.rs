//! File-backed watermark store.

pub mod store;

pub use store::FileWatermarkStore;
