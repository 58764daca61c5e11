use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use crate::data::Swing;

#[derive(Debug, Error, PartialEq)]
pub enum LoaderError {
    #[error("swing file contains no valid rows")]
    Empty,

    #[error("swing '{0}' must look like [NAME=]PRICE@DATE")]
    MissingSeparator(String),

    #[error("failed to parse price from value '{0}'")]
    ParseNumber(String),

    #[error("unrecognized date '{0}'")]
    Date(String),

    #[error("expected 2 or 3 fields (name, price, date), found {0}")]
    FieldCount(usize),
}

/// Parse a command-line swing of the form `[NAME=]PRICE@DATE`.
///
/// `position` is the 1-based slot used to label unnamed swings. An empty
/// price leaves the swing without a price so it is skipped downstream.
pub fn parse_swing_spec(spec: &str, position: usize) -> Result<Swing, LoaderError> {
    let (label, rest) = match spec.split_once('=') {
        Some((name, rest)) => (Some(name.trim()), rest),
        None => (None, spec),
    };
    let (price, date) = rest
        .split_once('@')
        .ok_or_else(|| LoaderError::MissingSeparator(spec.to_string()))?;

    Ok(Swing::new(
        swing_name(label, position),
        parse_price(price)?,
        parse_date(date.trim())?,
    ))
}

/// Load swings from a CSV file with `name,price,date` rows.
///
/// A leading header row is skipped. Two-field rows are read as
/// `price,date` and named by position.
pub fn load_swings_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Swing>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).with_context(|| format!("failed to open {:?}", path_ref))?;
    read_swings(file).with_context(|| format!("failed to read swings from {:?}", path_ref))
}

fn read_swings<R: std::io::Read>(reader: R) -> Result<Vec<Swing>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut swings = Vec::new();
    let mut first = true;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if std::mem::take(&mut first) && is_header(&record) {
            continue;
        }
        swings.push(parse_record(&record, swings.len() + 1)?);
    }

    if swings.is_empty() {
        return Err(LoaderError::Empty.into());
    }
    Ok(swings)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .map(|first| first.eq_ignore_ascii_case("name") || first.eq_ignore_ascii_case("swing"))
        .unwrap_or(false)
}

fn parse_record(record: &StringRecord, position: usize) -> Result<Swing, LoaderError> {

    let (label, price, date) = match record.len() {
        2 => (None, &record[0], &record[1]),
        3 => (Some(&record[0]), &record[1], &record[2]),
        n => return Err(LoaderError::FieldCount(n)),
    };

    Ok(Swing::new(
        swing_name(label, position),
        parse_price(price)?,
        parse_date(date)?,
    ))
}

fn swing_name(label: Option<&str>, position: usize) -> String {
    match label {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Swing {position}"),
    }
}

fn parse_price(value: &str) -> Result<Option<f64>, LoaderError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .map(Some)
        .ok_or_else(|| LoaderError::ParseNumber(trimmed.to_string()))
}

fn parse_date(value: &str) -> Result<NaiveDate, LoaderError> {
    let patterns = [
        "%Y-%m-%d",
        "%Y-%-m-%-d",
        "%Y/%m/%d",
        "%Y/%-m/%-d",
        "%m/%d/%Y",
        "%-m/%-d/%Y",
    ];
    patterns
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
        .ok_or_else(|| LoaderError::Date(value.to_string()))
}
