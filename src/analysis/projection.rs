use chrono::TimeDelta;
use itertools::Itertools;
use thiserror::Error;

use crate::analysis::scale;
use crate::data::{Projection, Swing};

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("cycle for {swing} at {angle}° shifts {day_offset} days, outside the supported calendar")]
    DateOutOfRange {
        swing: String,
        angle: f64,
        day_offset: i64,
    },

    #[error("cycle for {swing} at {angle}° has a non-finite day offset (price {price})")]
    NonFinite {
        swing: String,
        angle: f64,
        price: f64,
    },
}

/// Project one cycle date per (priced swing, angle) pair.
///
/// Day offsets are `scaled * sin(angle)` rounded half away from zero. The
/// result is stably sorted by cycle date, so rows sharing a date keep their
/// swing-major, angle-minor emission order.
///
/// `angles` is expected to be non-empty; an empty slice yields no rows.
pub fn project(swings: &[Swing], angles: &[f64]) -> Result<Vec<Projection>, ProjectionError> {
    let mut rows = swings
        .iter()
        .filter_map(|swing| swing.price.map(|price| (swing, price)))
        .cartesian_product(angles.iter().copied())
        .map(|((swing, price), angle)| project_one(swing, price, angle))
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by_key(|row| row.cycle_date);
    Ok(rows)
}

fn project_one(swing: &Swing, price: f64, angle: f64) -> Result<Projection, ProjectionError> {
    let (scaled, divisor) = scale(price);
    let raw_days = scaled * angle.to_radians().sin();
    if !raw_days.is_finite() {
        return Err(ProjectionError::NonFinite {
            swing: swing.name.clone(),
            angle,
            price,
        });
    }
    let day_offset = raw_days.round() as i64;

    let cycle_date = TimeDelta::try_days(day_offset)
        .and_then(|delta| swing.anchor_date.checked_add_signed(delta))
        .ok_or_else(|| ProjectionError::DateOutOfRange {
            swing: swing.name.clone(),
            angle,
            day_offset,
        })?;

    Ok(Projection {
        swing_name: swing.name.clone(),
        original_price: price,
        scaled_price: round_to(scaled, 6),
        divisor,
        angle,
        day_offset,
        cycle_date,
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
