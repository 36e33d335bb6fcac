//! # landwatch-realtime
//!
//! Live side of the LandWatch alert engine:
//!
//! - Notification tracker that fans in insert events from all three
//!   sources and recomputes the counters on a single writer task
//! - Optimistic visit handling against the persisted watermark
//! - [`AlertEngine`], the API consumed by the presentation layer

pub mod engine;
pub mod notification;

pub use engine::AlertEngine;
pub use notification::tracker::NotificationTracker;
