/// Errors raised while loading and grouping events
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("too many event categories ({found}, at most {max} can be shown); try fewer days")]
    TooManyCategories { found: usize, max: usize },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("malformed event feed: {0}")]
    Parse(#[from] simd_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
