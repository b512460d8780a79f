use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::FeedSource;

/// EONET v3 events endpoint
pub const EONET_EVENTS_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

/// Smallest day window the feed is queried with
pub const MIN_DAYS: u32 = 1;

/// Largest day window the feed is queried with
pub const MAX_DAYS: u32 = 200;

/// Points closer than this (in coordinate degrees) are merged
pub const DEFAULT_MERGE_DISTANCE: f64 = 60.0;

/// The map has one color slot per category
pub const MAX_CATEGORIES: usize = 8;

/// Smallest marker size a known magnitude maps to
pub const SIZE_MIN: f64 = 20.0;

/// Largest marker size a known magnitude maps to
pub const SIZE_MAX: f64 = 420.0;

/// Marker size for points with no usable magnitude
pub const UNKNOWN_SIZE: f64 = 250.0;

/// Visual size range magnitudes are rescaled into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeScale {
    pub min: f64,
    pub max: f64,
    pub unknown: f64,
}

impl Default for SizeScale {
    fn default() -> Self {
        Self {
            min: SIZE_MIN,
            max: SIZE_MAX,
            unknown: UNKNOWN_SIZE,
        }
    }
}

/// Tuning knobs for classification, normalization and merging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub merge_distance: f64,
    pub max_categories: usize,
    pub scale: SizeScale,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            merge_distance: DEFAULT_MERGE_DISTANCE,
            max_categories: MAX_CATEGORIES,
            scale: SizeScale::default(),
        }
    }
}

/// Command-line configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "natural-events-map", version, about)]
pub struct Config {
    /// Only fetch events from the last N days (1-200)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_DAYS)..=i64::from(MAX_DAYS))
    )]
    pub days: Option<u32>,

    /// Events endpoint to query
    #[arg(long, default_value = EONET_EVENTS_URL)]
    pub url: String,

    /// Read a saved feed document instead of fetching
    #[arg(long, conflicts_with = "days")]
    pub file: Option<PathBuf>,

    /// Start with nearby points merged
    #[arg(long)]
    pub merge: bool,

    /// Print point sets as JSON instead of opening the map
    #[arg(long)]
    pub print: bool,

    /// Directory holding Natural Earth GeoJSON files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve where events come from; a file takes precedence over the URL
    pub fn feed_source(&self) -> FeedSource {
        match &self.file {
            Some(path) => FeedSource::File(path.clone()),
            None => FeedSource::Url(feed_url(&self.url, self.days)),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Build the query URL, appending the day window when given
pub fn feed_url(base: &str, days: Option<u32>) -> String {
    match days {
        Some(days) => format!("{base}?days={days}"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.merge_distance, 60.0);
        assert_eq!(t.max_categories, 8);
        assert_eq!(t.scale.min, 20.0);
        assert_eq!(t.scale.max, 420.0);
        assert_eq!(t.scale.unknown, 250.0);
    }

    #[test]
    fn test_feed_url_days() {
        assert_eq!(feed_url(EONET_EVENTS_URL, None), EONET_EVENTS_URL);
        assert_eq!(
            feed_url(EONET_EVENTS_URL, Some(30)),
            "https://eonet.gsfc.nasa.gov/api/v3/events?days=30"
        );
    }

    #[test]
    fn test_file_wins_over_url() {
        let config = Config::parse_from(["natural-events-map", "--file", "events.json"]);
        assert!(matches!(
            config.feed_source(),
            FeedSource::File(p) if p == PathBuf::from("events.json")
        ));

        let config = Config::parse_from(["natural-events-map", "--days", "7"]);
        match config.feed_source() {
            FeedSource::Url(url) => assert!(url.ends_with("?days=7")),
            FeedSource::File(_) => panic!("expected url source"),
        }
    }

    #[test]
    fn test_days_window_bounds() {
        for days in ["0", "201", "100000"] {
            assert!(Config::try_parse_from(["natural-events-map", "--days", days]).is_err());
        }
        for days in ["1", "200"] {
            let config = Config::try_parse_from(["natural-events-map", "--days", days]).unwrap();
            assert_eq!(config.days, Some(days.parse().unwrap()));
        }
    }
}
