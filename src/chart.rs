pub mod calendar;
pub mod line;

pub use calendar::GridCell;
pub use line::SeriesPoint;

use chrono::NaiveDate;
use serde::Serialize;

use crate::transform::ValueTransform;
use crate::window::{DEFAULT_WEEKS, DisplayWindow};
use crate::{Error, aggr, record};
use feed::{DataPayload, GraphKind, MetricMeta};

/// Render-ready output for one metric. Built fresh on every refresh
/// and never patched in place; a stale build is simply discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    Calendar(Vec<GridCell>),
    Line(Vec<SeriesPoint>),
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Calendar(cells) => cells.len(),
            ChartData::Line(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs the whole pipeline for one metric over the default span.
pub fn build(
    meta: &MetricMeta,
    payload: &DataPayload,
    today: NaiveDate,
) -> Result<ChartData, Error> {
    build_with_weeks(meta, payload, today, DEFAULT_WEEKS)
}

/// Normalize, aggregate, transform and bind one metric's records into
/// the shape its configured graph wants.
pub fn build_with_weeks(
    meta: &MetricMeta,
    payload: &DataPayload,
    today: NaiveDate,
    weeks: u32,
) -> Result<ChartData, Error> {
    let transform = ValueTransform::try_from(meta)?;
    let window = DisplayWindow::compute(today, weeks, meta.cadence)?;

    let records = record::normalize(&payload.data);
    let buckets = aggr::aggregate(&records, meta.cadence, meta.aggregation);

    Ok(match meta.graph {
        GraphKind::Calendar => ChartData::Calendar(calendar::bind(&window, &buckets, &transform)),
        GraphKind::Line => ChartData::Line(line::series(&buckets, &transform)),
    })
}
