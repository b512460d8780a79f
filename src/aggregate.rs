use indexmap::IndexMap;
use tracing::debug;

use crate::classify::ClassifiedEvents;
use crate::config::Thresholds;
use crate::merge::merge_nearby;
use crate::normalize::normalize;
use crate::points::PointSet;

/// Plot-ready points per category, in classification order
pub type CategoryPoints = IndexMap<String, PointSet>;

/// Build point sets for the selected categories.
///
/// `selected[i]` refers to the i-th category of `classified`; positions past
/// the end of `selected` count as unselected. Unselected categories are left
/// out of the result entirely.
pub fn aggregate(
    classified: &ClassifiedEvents,
    selected: &[bool],
    merge: bool,
    thresholds: &Thresholds,
) -> CategoryPoints {
    let mut result = CategoryPoints::new();

    for ((category, events), _) in classified
        .iter()
        .zip(selected.iter().chain(std::iter::repeat(&false)))
        .filter(|(_, &on)| on)
    {
        let samples = events.iter().flat_map(|e| e.samples());
        let (positions, magnitudes): (Vec<(f64, f64)>, Vec<Option<f64>>) =
            samples.map(|s| ((s.lon, s.lat), s.magnitude)).unzip();

        let sizes = normalize(&magnitudes, &thresholds.scale);
        let mut points: PointSet = positions
            .into_iter()
            .zip(sizes)
            .map(|((x, y), v)| (x, y, v))
            .collect();

        if merge {
            let before = points.len();
            points = merge_nearby(&points, thresholds.merge_distance);
            debug!(category, before, after = points.len(), "merged nearby points");
        }

        result.insert(category.to_string(), points);
    }

    result
}
