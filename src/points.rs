use serde::Serialize;

/// Per-category plotting data: parallel x / y / size sequences.
/// Only grows through `push`, so the three sequences stay the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PointSet {
    x: Vec<f64>,
    y: Vec<f64>,
    value: Vec<f64>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, x: f64, y: f64, value: f64) {
        self.x.push(x);
        self.y.push(y);
        self.value.push(value);
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    pub fn values(&self) -> &[f64] {
        &self.value
    }

    /// Iterate `(x, y, value)` triples
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.value)
            .map(|((&x, &y), &v)| (x, y, v))
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn total_value(&self) -> f64 {
        self.value.iter().sum()
    }
}

impl FromIterator<(f64, f64, f64)> for PointSet {
    fn from_iter<I: IntoIterator<Item = (f64, f64, f64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut points = PointSet::with_capacity(iter.size_hint().0);
        for (x, y, v) in iter {
            points.push(x, y, v);
        }
        points
    }
}
