use chrono::NaiveDate;
use serde::Serialize;

/// Full catalogue of Gann angles offered for selection.
pub const ALL_GANN_ANGLES: [f64; 15] = [
    15.0, 21.0, 28.0, 30.0, 45.0, 49.0, 55.0, 60.0, 72.0, 81.0, 90.0, 99.0, 120.0, 144.0, 180.0,
];

/// Curated subset used when no explicit selection is made.
pub const DEFAULT_GANN_ANGLES: [f64; 7] = [15.0, 21.0, 28.0, 30.0, 45.0, 55.0, 60.0];

/// Upper bound on the number of swings accepted per run.
pub const MAX_SWINGS: usize = 3;

/// Price/date anchor from which cycle dates are projected.
///
/// A missing price skips the swing entirely; zero and negative prices are
/// still projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swing {
    pub name: String,
    pub price: Option<f64>,
    pub anchor_date: NaiveDate,
}

impl Swing {
    pub fn new(name: impl Into<String>, price: Option<f64>, anchor_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            price,
            anchor_date,
        }
    }

    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}

/// One projected cycle date for a (swing, angle) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub swing_name: String,
    pub original_price: f64,
    /// Scaled price rounded to six decimal places.
    pub scaled_price: f64,
    pub divisor: u32,
    pub angle: f64,
    pub day_offset: i64,
    pub cycle_date: NaiveDate,
}

/// Projection annotated with its pairwise cluster membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteredProjection {
    pub projection: Projection,
    pub is_clustered: bool,
    pub cluster_count: usize,
}

impl ClusteredProjection {
    pub fn cycle_date(&self) -> NaiveDate {
        self.projection.cycle_date
    }
}
