use std::collections::BTreeMap;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::record::NormalizedRecord;
use crate::window::week_start;
use feed::{Aggregation, Cadence};

/// Aggregated values keyed by bucket date, iterated in date order.
pub type Buckets = BTreeMap<NaiveDate, f64>;

/// Running stats for one bucket. All four reductions are tracked while
/// folding, so the policy only matters at finalization.
#[derive(Debug, Clone, Copy)]
pub struct BucketStats {
    pub count: u32,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl BucketStats {
    pub fn new(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
            min: value,
            max: value,
        }
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Mean keeps the full-precision sum until here and rounds once,
    /// half away from zero. The other policies pass through untouched.
    pub fn resolve(&self, policy: Aggregation) -> f64 {
        match policy {
            Aggregation::Mean => (self.sum / f64::from(self.count)).round(),
            Aggregation::Sum => self.sum,
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
        }
    }
}

/// The bucket a date falls into: the date itself for daily cadence,
/// the containing week's Sunday for weekly.
pub fn bucket_key(date: NaiveDate, cadence: Cadence) -> NaiveDate {
    match cadence {
        Cadence::Day => date,
        Cadence::Week => week_start(date),
    }
}

/// Folds normalized records into per-bucket values. A bucket exists
/// only if at least one record fell into it; days without data stay
/// absent rather than becoming zeros.
pub fn aggregate(records: &[NormalizedRecord], cadence: Cadence, policy: Aggregation) -> Buckets {
    let mut stats: FxHashMap<NaiveDate, BucketStats> = FxHashMap::default();

    for record in records {
        stats
            .entry(bucket_key(record.date, cadence))
            .and_modify(|bucket| bucket.update(record.value))
            .or_insert_with(|| BucketStats::new(record.value));
    }

    stats
        .into_iter()
        .map(|(date, bucket)| (date, bucket.resolve(policy)))
        .collect()
}
