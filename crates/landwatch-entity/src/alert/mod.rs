//! Normalized alert value objects.

pub mod model;
pub mod priority;
pub mod source;
pub mod stats;
pub mod status;

pub use model::Alert;
pub use priority::AlertPriority;
pub use source::AlertSource;
pub use stats::{AlertStats, SeriesBucket};
pub use status::AlertStatus;
