use feed::MetricMeta;

use crate::ConfigError;

/// Maps aggregated values into display space.
///
/// For reverse-scored metrics (where low raw values are the good ones)
/// the value is flipped within the configured range: `(max - value) +
/// min`. Results are not clamped, so an out-of-range input stays
/// visibly out of range instead of silently saturating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTransform {
    min_range: f64,
    max_range: f64,
    is_reverse: bool,
}

impl ValueTransform {
    pub fn new(min_range: f64, max_range: f64, is_reverse: bool) -> Result<Self, ConfigError> {
        if min_range > max_range {
            return Err(ConfigError::InvertedRange {
                min: min_range,
                max: max_range,
            });
        }

        Ok(Self {
            min_range,
            max_range,
            is_reverse,
        })
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.is_reverse {
            (self.max_range - value) + self.min_range
        } else {
            value
        }
    }

    pub fn min_range(&self) -> f64 {
        self.min_range
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }
}

impl Default for ValueTransform {
    /// Pass-through over an empty range, matching a metric with no
    /// range configured.
    fn default() -> Self {
        Self {
            min_range: 0.0,
            max_range: 0.0,
            is_reverse: false,
        }
    }
}

impl TryFrom<&MetricMeta> for ValueTransform {
    type Error = ConfigError;

    fn try_from(meta: &MetricMeta) -> Result<Self, ConfigError> {
        Self::new(meta.min_range, meta.max_range, meta.is_reverse)
    }
}
