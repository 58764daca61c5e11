use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use crate::data::{Swing, ALL_GANN_ANGLES, DEFAULT_GANN_ANGLES, MAX_SWINGS};
use crate::loader::{load_swings_from_csv, parse_swing_spec};

/// Command-line configuration for the Gann time cycle analyzer.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Swing anchor as `[NAME=]PRICE@DATE`; repeat up to three times.
    #[arg(
        short = 's',
        long = "swing",
        value_name = "SPEC",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub swings: Vec<String>,

    /// CSV file of `name,price,date` swing rows.
    #[arg(long, value_name = "FILE", conflicts_with = "swings")]
    pub swings_file: Option<PathBuf>,

    /// Comma-separated Gann angles in degrees.
    #[arg(
        short = 'a',
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "all_angles"
    )]
    pub angles: Vec<f64>,

    /// Use the full Gann angle catalogue.
    #[arg(long, action = ArgAction::SetTrue)]
    pub all_angles: bool,

    /// Cluster tolerance window in +/- days.
    #[arg(short = 'w', long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=30))]
    pub cluster_window: i64,

    /// Maximum number of rows shown in the cycle table.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(5..=200))]
    pub max_rows: u16,

    /// Write the full annotated cycle table to this CSV file.
    #[arg(short = 'o', long = "csv", value_name = "FILE")]
    pub csv_path: Option<PathBuf>,
}

impl AppConfig {
    /// Angles to analyze: the full catalogue, the explicit list, or the
    /// curated default subset, in that order of precedence.
    pub fn selected_angles(&self) -> Vec<f64> {
        if self.all_angles {
            ALL_GANN_ANGLES.to_vec()
        } else if !self.angles.is_empty() {
            self.angles.clone()
        } else {
            DEFAULT_GANN_ANGLES.to_vec()
        }
    }

    pub fn resolve_swings(&self) -> Result<Vec<Swing>> {
        let swings = if let Some(path) = &self.swings_file {
            load_swings_from_csv(path)?
        } else if !self.swings.is_empty() {
            self.swings
                .iter()
                .enumerate()
                .map(|(idx, spec)| {
                    parse_swing_spec(spec, idx + 1)
                        .with_context(|| format!("invalid --swing {spec:?}"))
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            default_swings()?
        };

        if swings.len() > MAX_SWINGS {
            bail!(
                "at most {MAX_SWINGS} swings are supported, got {}",
                swings.len()
            );
        }
        Ok(swings)
    }
}

fn default_swings() -> Result<Vec<Swing>> {
    [
        (210.0, (2025, 4, 7)),
        (235.0, (2025, 5, 9)),
        (198.0, (2025, 6, 15)),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, (price, (y, m, d)))| {
        let anchor = NaiveDate::from_ymd_opt(y, m, d)
            .with_context(|| format!("invalid default swing date {y}-{m}-{d}"))?;
        Ok(Swing::new(format!("Swing {}", idx + 1), Some(price), anchor))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        let mut argv = vec!["gann-cycles"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_original_form() {
        let config = parse(&[]);
        assert_eq!(config.cluster_window, 3);
        assert_eq!(config.max_rows, 50);
        assert_eq!(config.selected_angles(), DEFAULT_GANN_ANGLES.to_vec());

        let swings = config.resolve_swings().unwrap();
        assert_eq!(swings.len(), 3);
        assert_eq!(swings[0].name, "Swing 1");
        assert_eq!(swings[0].price, Some(210.0));
        assert_eq!(swings[2].anchor_date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    }

    #[test]
    fn explicit_angles_and_all_angles() {
        assert_eq!(parse(&["-a", "45,90,180"]).selected_angles(), vec![45.0, 90.0, 180.0]);
        assert_eq!(
            parse(&["--all-angles"]).selected_angles(),
            ALL_GANN_ANGLES.to_vec()
        );
    }

    #[test]
    fn swings_from_flags() {
        let config = parse(&["-s", "1050@2025-04-07", "-s", "Low=@2025-05-09"]);
        let swings = config.resolve_swings().unwrap();
        assert_eq!(swings.len(), 2);
        assert_eq!(swings[0].name, "Swing 1");
        assert_eq!(swings[1].name, "Low");
        assert_eq!(swings[1].price, None);
    }

    #[test]
    fn too_many_swings_rejected() {
        let config = parse(&[
            "-s", "1@2025-01-01", "-s", "2@2025-01-02", "-s", "3@2025-01-03", "-s", "4@2025-01-04",
        ]);
        assert!(config.resolve_swings().is_err());
    }

    #[test]
    fn window_and_rows_are_range_checked() {
        let bad = [
            vec!["gann-cycles", "-w", "0"],
            vec!["gann-cycles", "-w", "31"],
            vec!["gann-cycles", "--max-rows", "4"],
            vec!["gann-cycles", "--max-rows", "201"],
            vec!["gann-cycles", "-a", "45", "--all-angles"],
        ];
        for argv in bad {
            assert!(AppConfig::try_parse_from(argv.clone()).is_err(), "{argv:?}");
        }
    }
}
