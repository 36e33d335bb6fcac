//! # landwatch-cache
//!
//! Watermark store implementations for LandWatch. Supports two modes:
//!
//! - **memory**: process-lifetime store backed by [dashmap](https://crates.io/crates/dashmap)
//! - **file**: JSON file on local disk, surviving restarts like browser local storage
//!
//! The backend is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::WatermarkManager;
