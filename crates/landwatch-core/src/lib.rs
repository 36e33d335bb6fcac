//! # landwatch-core
//!
//! Core crate for LandWatch. Contains the boundary traits consumed by the
//! alert engine (source adapters, watermark stores), configuration schemas,
//! source and filter types, insert events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other LandWatch crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
