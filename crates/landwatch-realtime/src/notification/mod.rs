//! Notification counters and their recomputation loop.

pub mod counter;
pub mod tracker;
mod worker;

pub use tracker::NotificationTracker;
