//! Greedy proximity merge of map points.

use crate::points::PointSet;

/// Flat distance in coordinate units (degrees), no geodesic correction
#[inline(always)]
fn planar_distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x0 - x1;
    let dy = y0 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Merge points lying closer than `threshold` to one another.
///
/// Single greedy pass in input order: each unvisited point claims every other
/// unvisited point within `threshold` of itself. A point that claimed at least
/// one neighbour becomes a merged point at the mean position of the group with
/// the summed value. Points never claimed follow, unchanged and in input order.
/// Claims are not transitive, so the result depends on input order.
pub fn merge_nearby(points: &PointSet, threshold: f64) -> PointSet {
    let xs = points.xs();
    let ys = points.ys();
    let values = points.values();
    let n = points.len();

    let mut visited = vec![false; n];
    let mut merged = PointSet::with_capacity(n);
    let mut neighbours: Vec<usize> = Vec::new();

    for i in 0..n {
        if visited[i] {
            continue;
        }

        neighbours.clear();
        for j in 0..n {
            if j == i || visited[j] {
                continue;
            }
            if planar_distance(xs[i], ys[i], xs[j], ys[j]) < threshold {
                visited[j] = true;
                neighbours.push(j);
            }
        }

        if neighbours.is_empty() {
            continue;
        }

        visited[i] = true;
        let count = (neighbours.len() + 1) as f64;
        let (sum_x, sum_y, sum_v) = neighbours.iter().fold(
            (xs[i], ys[i], values[i]),
            |(sx, sy, sv), &j| (sx + xs[j], sy + ys[j], sv + values[j]),
        );
        merged.push(sum_x / count, sum_y / count, sum_v);
    }

    for i in (0..n).filter(|&i| !visited[i]) {
        merged.push(xs[i], ys[i], values[i]);
    }

    merged
}
