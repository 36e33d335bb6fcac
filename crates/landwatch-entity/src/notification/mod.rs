//! Notification counter state.

pub mod phase;
pub mod state;

pub use phase::TrackerPhase;
pub use state::{NotificationState, VisitState};
