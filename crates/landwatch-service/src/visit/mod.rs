//! Visit recording against the watermark store.

pub mod recorder;

pub use recorder::{VisitOutcome, VisitRecorder};
