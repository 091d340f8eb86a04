use chrono::NaiveDate;
use serde::Serialize;

use crate::aggr::Buckets;
use crate::transform::ValueTransform;

/// One point of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Flattens buckets into a date-ordered series. Bucket gaps simply
/// produce no point; the renderer decides whether to break or bridge
/// the line, and clips to its own axis domain.
pub fn series(buckets: &Buckets, transform: &ValueTransform) -> Vec<SeriesPoint> {
    buckets
        .iter()
        .map(|(date, raw)| SeriesPoint {
            date: *date,
            value: transform.apply(*raw),
        })
        .collect()
}

/// Y-axis domain for a series: the configured range when one is set,
/// otherwise `[0, max |value|]` so unconfigured metrics still scale.
pub fn value_domain(points: &[SeriesPoint], transform: &ValueTransform) -> (f64, f64) {
    if transform.min_range() == 0.0 && transform.max_range() == 0.0 {
        let peak = points
            .iter()
            .map(|point| point.value.abs())
            .fold(0.0_f64, f64::max);
        (0.0, peak)
    } else {
        (transform.min_range(), transform.max_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_is_date_ordered() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2024, 1, 5), 2.0);
        buckets.insert(date(2024, 1, 1), 4.0);
        buckets.insert(date(2024, 1, 3), 3.0);

        let points = series(&buckets, &ValueTransform::default());

        assert_eq!(
            points,
            vec![
                SeriesPoint {
                    date: date(2024, 1, 1),
                    value: 4.0
                },
                SeriesPoint {
                    date: date(2024, 1, 3),
                    value: 3.0
                },
                SeriesPoint {
                    date: date(2024, 1, 5),
                    value: 2.0
                },
            ]
        );
    }

    #[test]
    fn series_applies_the_transform() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2024, 1, 1), 1.0);

        let transform = ValueTransform::new(0.0, 5.0, true).unwrap();
        let points = series(&buckets, &transform);

        assert_eq!(points[0].value, 4.0);
    }

    #[test]
    fn value_domain_prefers_the_configured_range() {
        let transform = ValueTransform::new(1.0, 5.0, false).unwrap();

        assert_eq!(value_domain(&[], &transform), (1.0, 5.0));
    }

    #[test]
    fn unconfigured_range_scales_to_the_peak() {
        let points = [
            SeriesPoint {
                date: date(2024, 1, 1),
                value: 3.0,
            },
            SeriesPoint {
                date: date(2024, 1, 2),
                value: -5.0,
            },
        ];

        assert_eq!(value_domain(&points, &ValueTransform::default()), (0.0, 5.0));
        assert_eq!(value_domain(&[], &ValueTransform::default()), (0.0, 0.0));
    }
}
