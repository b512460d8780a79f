//! Natural event tracking: EONET feed loading, category grouping, magnitude
//! normalization and proximity merging, plus a braille terminal world map.

pub mod aggregate;
pub mod app;
pub mod braille;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod event;
pub mod feed;
pub mod logging;
pub mod map;
pub mod merge;
pub mod normalize;
pub mod points;
pub mod ui;

pub use aggregate::{aggregate, CategoryPoints};
pub use classify::{classify, ClassifiedEvents};
pub use config::{SizeScale, Thresholds};
pub use error::{TrackerError, TrackerResult};
pub use event::{Event, Sample};
pub use merge::merge_nearby;
pub use normalize::{normalize, value_range};
pub use points::PointSet;
