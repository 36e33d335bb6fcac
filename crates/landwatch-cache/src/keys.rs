//! Watermark key builders.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Key of the "user last opened the alert view" watermark.
const ALERTS_LAST_VISITED: &str = "alerts_last_visited";

/// Key of the alert-view watermark.
pub fn alerts_last_visited() -> &'static str {
    ALERTS_LAST_VISITED
}
