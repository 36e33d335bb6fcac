//! Core traits defined in `landwatch-core` and implemented by other crates.

pub mod source;
pub mod watermark;

pub use source::{SourceAdapter, SourceRecord};
pub use watermark::WatermarkStore;
