//! Alert normalization, filtering, and the fetch service.

pub mod filter;
pub mod normalizer;
pub mod service;

pub use filter::{SourceFilter, filter_alerts};
pub use normalizer::{AlertNormalizer, SourceBatch};
pub use service::AlertService;
