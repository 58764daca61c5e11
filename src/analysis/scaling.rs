/// Divisor ladder, checked top to bottom; the first threshold the price
/// reaches wins.
const DIVISOR_LADDER: [(f64, u32); 5] = [
    (100_000.0, 3000),
    (25_000.0, 500),
    (10_000.0, 100),
    (1_000.0, 10),
    (500.0, 2),
];

/// Map a raw price onto the normalized cycle scale.
///
/// Returns the scaled price together with the divisor that produced it.
/// Prices below the lowest threshold (including zero, negatives and NaN)
/// use a divisor of 1.
pub fn scale(price: f64) -> (f64, u32) {
    let divisor = DIVISOR_LADDER
        .iter()
        .find(|(threshold, _)| price >= *threshold)
        .map(|&(_, divisor)| divisor)
        .unwrap_or(1);
    (price / f64::from(divisor), divisor)
}
