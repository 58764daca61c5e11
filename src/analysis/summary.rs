use crate::data::{ClusteredProjection, Swing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub projections: usize,
    pub swings_used: usize,
    pub angles: usize,
    pub clustered: usize,
    /// Largest cluster count among clustered rows, if any row clustered.
    pub max_cluster_count: Option<usize>,
}

/// Rows flagged as clustered, in their original date order.
pub fn clustered_only(rows: &[ClusteredProjection]) -> Vec<&ClusteredProjection> {
    rows.iter().filter(|row| row.is_clustered).collect()
}

pub fn summarize(rows: &[ClusteredProjection], swings: &[Swing], angles: usize) -> CycleSummary {
    let clustered = clustered_only(rows);
    CycleSummary {
        projections: rows.len(),
        swings_used: swings.iter().filter(|swing| swing.has_price()).count(),
        angles,
        clustered: clustered.len(),
        max_cluster_count: clustered.iter().map(|row| row.cluster_count).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{annotate_clusters, project};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn summary_counts_priced_swings_and_largest_cluster() {
        let swings = vec![
            Swing::new("Swing 1", Some(210.0), date(2025, 4, 7)),
            Swing::new("Swing 2", None, date(2025, 5, 9)),
            Swing::new("Swing 3", Some(210.0), date(2025, 4, 8)),
        ];
        let angles = [0.0, 90.0];
        let projections = project(&swings, &angles).unwrap();
        let rows = annotate_clusters(&projections, 3);
        let summary = summarize(&rows, &swings, angles.len());

        assert_eq!(summary.projections, 4);
        assert_eq!(summary.swings_used, 2);
        assert_eq!(summary.angles, 2);
        assert_eq!(summary.clustered, 4);
        assert_eq!(summary.max_cluster_count, Some(2));
    }

    #[test]
    fn no_clusters_means_no_maximum() {
        let swings = vec![Swing::new("Swing 1", Some(210.0), date(2025, 4, 7))];
        let angles = [0.0, 90.0];
        let projections = project(&swings, &angles).unwrap();
        let rows = annotate_clusters(&projections, 3);

        assert!(clustered_only(&rows).is_empty());
        assert_eq!(summarize(&rows, &swings, angles.len()).max_cluster_count, None);
    }
}
