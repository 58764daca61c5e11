use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::{clustered_only, CycleSummary};
use crate::data::ClusteredProjection;

const DATE_FORMAT: &str = "%Y-%m-%d";

const CSV_HEADER: [&str; 9] = [
    "Swing",
    "Price",
    "Scaled Price",
    "Divisor",
    "Angle°",
    "Days",
    "Cycle Date",
    "Cluster",
    "Cluster Count",
];

#[derive(Tabled)]
struct CycleRow {
    #[tabled(rename = "Swing")]
    swing: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Cycle Date")]
    cycle_date: String,
    #[tabled(rename = "Cluster")]
    cluster: &'static str,
    #[tabled(rename = "Cluster Count")]
    cluster_count: usize,
}

#[derive(Tabled)]
struct ClusteredRow {
    #[tabled(rename = "Swing")]
    swing: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Cycle Date")]
    cycle_date: String,
    #[tabled(rename = "Cluster Count")]
    cluster_count: usize,
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "Swing")]
    swing: &'a str,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Scaled Price")]
    scaled_price: f64,
    #[serde(rename = "Divisor")]
    divisor: u32,
    #[serde(rename = "Angle°")]
    angle: f64,
    #[serde(rename = "Days")]
    days: i64,
    #[serde(rename = "Cycle Date")]
    cycle_date: String,
    #[serde(rename = "Cluster")]
    cluster: &'static str,
    #[serde(rename = "Cluster Count")]
    cluster_count: usize,
}

impl<'a> From<&'a ClusteredProjection> for CsvRecord<'a> {
    fn from(row: &'a ClusteredProjection) -> Self {
        let p = &row.projection;
        Self {
            swing: &p.swing_name,
            price: p.original_price,
            scaled_price: p.scaled_price,
            divisor: p.divisor,
            angle: p.angle,
            days: p.day_offset,
            cycle_date: p.cycle_date.format(DATE_FORMAT).to_string(),
            cluster: cluster_flag(row),
            cluster_count: row.cluster_count,
        }
    }
}

fn cluster_flag(row: &ClusteredProjection) -> &'static str {
    if row.is_clustered {
        "YES"
    } else {
        ""
    }
}

pub fn print_report(
    rows: &[ClusteredProjection],
    summary: &CycleSummary,
    cluster_window: i64,
    max_rows: usize,
) {
    println!("\n=== Gann Time Cycle Table + Cross-Swing Cluster Detection ===\n");

    if rows.is_empty() {
        println!("No swing data entered yet.");
        return;
    }

    let table_rows: Vec<CycleRow> = rows
        .iter()
        .take(max_rows)
        .map(|row| CycleRow {
            swing: row.projection.swing_name.clone(),
            days: row.projection.day_offset,
            cycle_date: row.cycle_date().format(DATE_FORMAT).to_string(),
            cluster: cluster_flag(row),
            cluster_count: row.cluster_count,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");
    if rows.len() > max_rows {
        println!("(showing {max_rows} of {} rows)", rows.len());
    }

    println!("\nLegend:");
    println!(
        "  Cluster: rows within +/-{cluster_window} days of at least one other projected date."
    );
    println!(
        "  Cluster Count: how many projected dates (across swings/angles) fall within the window."
    );

    println!("\n=== Clustered Dates (High-Probability Windows) ===\n");
    let clustered: Vec<ClusteredRow> = clustered_only(rows)
        .into_iter()
        .map(|row| ClusteredRow {
            swing: row.projection.swing_name.clone(),
            days: row.projection.day_offset,
            cycle_date: row.cycle_date().format(DATE_FORMAT).to_string(),
            cluster_count: row.cluster_count,
        })
        .collect();
    if clustered.is_empty() {
        println!("No clusters detected with current swings / angles / window.");
    } else {
        let mut table = Table::new(clustered);
        table.with(Style::rounded());
        println!("{table}");
    }

    println!(
        "\nComputed {} cycle projections from {} swings and {} angles.",
        summary.projections, summary.swings_used, summary.angles
    );
    match summary.max_cluster_count {
        Some(max) => println!(
            "Detected {max} overlapping projections in a cluster (max cluster size)."
        ),
        None => println!("No cross-swing clusters found with the given parameters."),
    }
}

/// Serialize the annotated cycle table as CSV, header row included.
pub fn write_csv<W: Write>(writer: W, rows: &[ClusteredProjection]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(CSV_HEADER)?;
    }
    for row in rows {
        csv_writer.serialize(CsvRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(path: P, rows: &[ClusteredProjection]) -> Result<()> {
    let path_ref = path.as_ref();
    let file =
        File::create(path_ref).with_context(|| format!("failed to create {:?}", path_ref))?;
    write_csv(file, rows).with_context(|| format!("failed to write cycles to {:?}", path_ref))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{annotate_clusters, project};
    use crate::data::Swing;
    use chrono::NaiveDate;

    fn csv_for(swings: &[Swing], angles: &[f64], window: i64) -> String {
        let projections = project(swings, angles).unwrap();
        let rows = annotate_clusters(&projections, window);
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &rows).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn csv_has_header_and_formatted_fields() {
        let anchor = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let swings = [
            Swing::new("Swing 1", Some(1050.0), anchor),
            Swing::new("Swing 2", Some(1050.0), NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()),
        ];
        let csv = csv_for(&swings, &[90.0], 3);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(lines[1], "Swing 1,1050.0,105.0,10,90.0,105,2025-07-21,YES,2");
        assert_eq!(lines[2], "Swing 2,1050.0,105.0,10,90.0,105,2025-07-23,YES,2");
    }

    #[test]
    fn unclustered_rows_have_empty_flag() {
        let anchor = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let swings = [Swing::new("Swing 1", Some(210.0), anchor)];
        let csv = csv_for(&swings, &[0.0], 3);
        assert_eq!(csv.lines().nth(1), Some("Swing 1,210.0,210.0,1,0.0,0,2025-04-07,,1"));
    }

    #[test]
    fn empty_table_still_writes_header() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.trim_end(), CSV_HEADER.join(","));
    }
}
