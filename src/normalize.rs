//! Magnitude → marker size rescaling.

use crate::config::SizeScale;

/// Smallest and largest known magnitude, or `None` with fewer than two known values
pub fn value_range(values: &[Option<f64>]) -> Option<(f64, f64)> {
    let mut known = values.iter().flatten().copied();
    let first = known.next()?;
    let mut count = 1usize;
    let (min, max) = known.fold((first, first), |(lo, hi), v| {
        count += 1;
        (lo.min(v), hi.max(v))
    });
    (count > 1).then_some((min, max))
}

/// Rescale magnitudes linearly into `[scale.min, scale.max]`.
///
/// Missing magnitudes, and every entry when fewer than two magnitudes are
/// known, become `scale.unknown`. When all known magnitudes are equal the
/// range is empty and they map to `scale.min`.
pub fn normalize(values: &[Option<f64>], scale: &SizeScale) -> Vec<f64> {
    let range = value_range(values);
    let span = scale.max - scale.min;

    values
        .iter()
        .map(|value| match (value, range) {
            (Some(v), Some((lo, hi))) if hi > lo => scale.min + span * ((v - lo) / (hi - lo)),
            (Some(_), Some(_)) => scale.min,
            _ => scale.unknown,
        })
        .collect()
}
