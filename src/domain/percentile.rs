//! Valuation percentile ranking against a filtered history window.

/// Neutral percentile returned when too little clean history exists.
pub const NEUTRAL_PERCENTILE: f64 = 50.0;

/// Rank `current` within `values` after clipping to `[clip_low, clip_high]`.
///
/// Clipping suppresses distortion from extreme regime outliers. If fewer
/// than 2 values survive the filter this is an insufficient-data fallback,
/// not an error: the neutral default of 50 is returned. Otherwise the rank
/// is `(below + at_or_below) * 50 / n`, counting one extra when the query
/// ties a window value, so a tied query ranks above the values it equals.
/// The caller feeds the current observation into the window before ranking,
/// which makes the tie branch the common path.
pub fn rank(values: &[f64], clip_low: f64, clip_high: f64, current: f64) -> f64 {
    let filtered: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v >= clip_low && *v <= clip_high)
        .collect();

    if filtered.len() < 2 {
        return NEUTRAL_PERCENTILE;
    }

    let below = filtered.iter().filter(|v| **v < current).count() as f64;
    let at_or_below = filtered.iter().filter(|v| **v <= current).count() as f64;
    let n = filtered.len() as f64;

    let tie = if at_or_below > below { 1.0 } else { 0.0 };
    (below + at_or_below + tie) * 50.0 / n
}
