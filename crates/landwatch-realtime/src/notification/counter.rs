//! Counting queries across all sources.

use futures::future::join_all;
use tracing::warn;

use landwatch_core::types::{RecordFilter, SourceKind};
use landwatch_database::sources::SourceSet;

/// Sum of `filter` matches over the three sources, queried concurrently.
///
/// A source whose count fails contributes zero.
pub async fn count_all(sources: &SourceSet, filter: &RecordFilter) -> u64 {
    let counts = join_all(SourceKind::ALL.map(|kind| sources.count(kind, filter))).await;

    counts
        .into_iter()
        .zip(SourceKind::ALL)
        .map(|(result, kind)| match result {
            Ok(count) => count,
            Err(e) => {
                warn!(source = %kind, "Count query failed, counting as zero: {e}");
                0
            }
        })
        .sum()
}
