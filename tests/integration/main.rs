//! End-to-end tests for the alert engine over in-process sources.

mod alerts_test;
mod helpers;
mod notification_test;
mod visit_test;
