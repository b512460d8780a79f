/// One geographic sample of an event: position plus optional magnitude
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub lon: f64,
    pub lat: f64,
    pub magnitude: Option<f64>,
}

impl Sample {
    pub fn new(lon: f64, lat: f64, magnitude: Option<f64>) -> Self {
        Self { lon, lat, magnitude }
    }
}

/// A single natural event (storm track, wildfire, volcano, ...)
///
/// Samples are stored together so longitudes, latitudes and magnitudes
/// always have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    category: String,
    samples: Vec<Sample>,
}

impl Event {
    pub fn new(category: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            category: category.into(),
            samples,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Longitudes
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.lon)
    }

    /// Latitudes
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.lat)
    }

    /// Magnitudes, `None` where the feed had none
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.samples.iter().map(|s| s.magnitude)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_views() {
        let event = Event::new(
            "severeStorms",
            vec![
                Sample::new(-10.2, -15.0, Some(2.0)),
                Sample::new(20.3, 25.5, None),
            ],
        );
        assert_eq!(event.xs().collect::<Vec<_>>(), vec![-10.2, 20.3]);
        assert_eq!(event.ys().collect::<Vec<_>>(), vec![-15.0, 25.5]);
        assert_eq!(event.values().collect::<Vec<_>>(), vec![Some(2.0), None]);
        assert_eq!(event.len(), 2);
    }

    #[test]
    fn test_mutators() {
        let mut event = Event::new("severeStorms", Vec::new());
        assert!(event.is_empty());
        event.set_category("volcanoes");
        event.push(Sample::new(11.23, 16.43, Some(3.0)));
        assert_eq!(event.category(), "volcanoes");
        assert_eq!(event.samples(), &[Sample::new(11.23, 16.43, Some(3.0))]);
    }
}
