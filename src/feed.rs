//! EONET feed access: fetch, parse and convert raw records to events.

use geojson::Value;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::event::{Event, Sample};

/// Where to read the event feed from
#[derive(Clone, Debug, PartialEq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

/// Top-level feed document
#[derive(Debug, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub geometry: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeometry {
    #[serde(default)]
    pub magnitude_value: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

/// Geometry coordinates; EONET emits points and, for area events, polygons.
/// Anything else is kept opaque and contributes no position.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinates {
    Point(Vec<f64>),
    Polygon(Vec<Vec<Vec<f64>>>),
    Other(simd_json::OwnedValue),
}

impl RawCoordinates {
    pub fn into_value(self) -> Option<Value> {
        match self {
            RawCoordinates::Point(p) => Some(Value::Point(p)),
            RawCoordinates::Polygon(rings) => Some(Value::Polygon(rings)),
            RawCoordinates::Other(_) => None,
        }
    }
}

/// Single representative position for a geometry: the point itself, or the
/// mean vertex of a polygon's exterior ring
pub fn representative_position(value: &Value) -> Option<(f64, f64)> {
    match value {
        Value::Point(coords) if coords.len() >= 2 => Some((coords[0], coords[1])),
        Value::Polygon(rings) => {
            let exterior = rings.first()?;
            let vertices: Vec<(f64, f64)> = exterior
                .iter()
                .filter(|c| c.len() >= 2)
                .map(|c| (c[0], c[1]))
                .collect();
            if vertices.is_empty() {
                return None;
            }
            let n = vertices.len() as f64;
            let (sx, sy) = vertices
                .iter()
                .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
            Some((sx / n, sy / n))
        }
        _ => None,
    }
}

impl RawEvent {
    /// Convert to an event keyed by the first category id.
    /// Returns `None` for records without a category.
    pub fn into_event(self) -> Option<Event> {
        let category = self.categories.into_iter().next()?.id;
        let samples = self
            .geometry
            .into_iter()
            .filter_map(|geo| {
                let value = geo.coordinates?.into_value()?;
                let (lon, lat) = representative_position(&value)?;
                Some(Sample::new(lon, lat, geo.magnitude_value))
            })
            .collect();
        Some(Event::new(category, samples))
    }
}

/// Parse a feed document. The buffer is used as scratch space by the parser.
pub fn parse_feed(bytes: &mut [u8]) -> TrackerResult<Vec<Event>> {
    let feed: Feed = simd_json::serde::from_slice(bytes)?;
    let total = feed.events.len();

    let events: Vec<Event> = feed
        .events
        .into_iter()
        .filter_map(|raw| {
            let (id, title) = (raw.id.clone(), raw.title.clone());
            let event = raw.into_event();
            if event.is_none() {
                warn!(id = %id, title = %title, "skipping event without a category");
            }
            event
        })
        .collect();

    info!(total, kept = events.len(), "parsed event feed");
    Ok(events)
}

/// Download the raw feed body
pub fn fetch_feed(url: &str, timeout: Duration) -> TrackerResult<Vec<u8>> {
    info!(url, "fetching event feed");
    let response = ureq::get(url)
        .timeout(timeout)
        .call()
        .map_err(|source| TrackerError::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        })?;

    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Load events from a URL or a saved feed file
pub fn load_events(source: &FeedSource, timeout: Duration) -> TrackerResult<Vec<Event>> {
    let mut bytes = match source {
        FeedSource::Url(url) => fetch_feed(url, timeout)?,
        FeedSource::File(path) => {
            info!(path = %path.display(), "reading event feed");
            fs::read(path)?
        }
    };
    parse_feed(&mut bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "EONET Events",
        "events": [
            {
                "id": "EONET_1",
                "title": "Tropical Storm A",
                "categories": [{"id": "severeStorms", "title": "Severe Storms"}],
                "geometry": [
                    {"magnitudeValue": 35.0, "magnitudeUnit": "kts", "date": "2024-09-01T00:00:00Z",
                     "type": "Point", "coordinates": [-60.5, 15.2]},
                    {"magnitudeValue": null, "date": "2024-09-01T06:00:00Z",
                     "type": "Point", "coordinates": [-61.0, 15.9]}
                ]
            },
            {
                "id": "EONET_2",
                "title": "Fire B",
                "categories": [{"id": "wildfires", "title": "Wildfires"}],
                "geometry": [
                    {"magnitudeValue": null, "date": "2024-09-02T00:00:00Z", "type": "Polygon",
                     "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]]}
                ]
            },
            {
                "id": "EONET_3",
                "title": "Uncategorised",
                "categories": [],
                "geometry": [
                    {"date": "2024-09-03T00:00:00Z", "type": "Point", "coordinates": [1.0, 1.0]}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_feed() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        let events = parse_feed(&mut bytes).unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].category(), "severeStorms");
        assert_eq!(events[0].xs().collect::<Vec<_>>(), vec![-60.5, -61.0]);
        assert_eq!(events[0].ys().collect::<Vec<_>>(), vec![15.2, 15.9]);
        assert_eq!(events[0].values().collect::<Vec<_>>(), vec![Some(35.0), None]);

        assert_eq!(events[1].category(), "wildfires");
        assert_eq!(events[1].samples(), &[Sample::new(1.0, 1.0, None)]);
    }

    #[test]
    fn test_unusable_geometries_skipped() {
        let mut bytes = br#"{
            "events": [
                {
                    "id": "EONET_4",
                    "title": "Iceberg C",
                    "categories": [{"id": "seaLakeIce"}],
                    "geometry": [
                        {"magnitudeValue": 12.0, "type": "Point"},
                        {"magnitudeValue": null, "type": "Point", "coordinates": null},
                        {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                        {"type": "Point", "coordinates": "n/a"},
                        {"magnitudeValue": 3.5, "type": "Point", "coordinates": [10.0, -70.0]}
                    ]
                },
                {
                    "id": "EONET_5",
                    "title": "Volcano D",
                    "categories": [{"id": "volcanoes"}],
                    "geometry": [{"type": "Point", "coordinates": [14.4, 40.8]}]
                }
            ]
        }"#
        .to_vec();

        let events = parse_feed(&mut bytes).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].samples(), &[Sample::new(10.0, -70.0, Some(3.5))]);
        assert_eq!(events[1].samples(), &[Sample::new(14.4, 40.8, None)]);
    }

    #[test]
    fn test_malformed_feed() {
        let mut bytes = b"{\"events\": [".to_vec();
        assert!(matches!(parse_feed(&mut bytes), Err(TrackerError::Parse(_))));
    }

    #[test]
    fn test_missing_events_key() {
        let mut bytes = b"{}".to_vec();
        assert!(parse_feed(&mut bytes).unwrap().is_empty());
    }

    #[test]
    fn test_representative_position() {
        assert_eq!(representative_position(&Value::Point(vec![3.0, 4.0])), Some((3.0, 4.0)));
        assert_eq!(representative_position(&Value::Point(vec![3.0])), None);
        assert_eq!(representative_position(&Value::Polygon(vec![])), None);
        assert_eq!(
            representative_position(&Value::LineString(vec![vec![0.0, 0.0]])),
            None
        );
    }
}
