//! Core type definitions used across the LandWatch workspace.

pub mod filter;
pub mod source;
pub mod subscription;

pub use filter::RecordFilter;
pub use source::SourceKind;
pub use subscription::SubscriptionHandle;
