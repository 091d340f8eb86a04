pub mod aggr;
pub mod chart;
pub mod record;
pub mod transform;
pub mod window;

pub use aggr::{Buckets, aggregate, bucket_key};
pub use chart::{ChartData, GridCell, SeriesPoint, build, build_with_weeks};
pub use record::{NormalizedRecord, ParseError, normalize, try_parse};
pub use transform::ValueTransform;
pub use window::{DEFAULT_WEEKS, DisplayWindow, week_start};

pub use feed::{Aggregation, Cadence, DataPayload, FeedError, GraphKind, MetricMeta, RawRecord};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("Value range is inverted: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("Weeks to show must be greater than zero")]
    ZeroWeeks,
}
