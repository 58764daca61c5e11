use chrono::NaiveDate;

use crate::data::{ClusteredProjection, Projection};

/// Annotate each projection with the number of projections whose cycle date
/// lies within `window_days` of its own (itself included).
///
/// `projections` must already be sorted by cycle date and `window_days`
/// should be at least 1. Counting is pairwise: a chain of dates that are
/// each close to their neighbour is not merged into a single group.
pub fn annotate_clusters(
    projections: &[Projection],
    window_days: i64,
) -> Vec<ClusteredProjection> {
    let dates: Vec<NaiveDate> = projections.iter().map(|p| p.cycle_date).collect();

    projections
        .iter()
        .enumerate()
        .map(|(idx, projection)| {
            let cluster_count = count_within_window(&dates, idx, window_days);
            ClusteredProjection {
                projection: projection.clone(),
                is_clustered: cluster_count >= 2,
                cluster_count,
            }
        })
        .collect()
}

fn count_within_window(dates: &[NaiveDate], idx: usize, window_days: i64) -> usize {
    let anchor = dates[idx];
    let within = |other: NaiveDate| days_apart(anchor, other) <= window_days;

    let before = dates[..idx]
        .iter()
        .rev()
        .take_while(|date| within(**date))
        .count();
    let after = dates[idx + 1..]
        .iter()
        .take_while(|date| within(**date))
        .count();

    before + 1 + after
}

fn days_apart(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}
