use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::aggr::Buckets;
use crate::transform::ValueTransform;
use crate::window::{DisplayWindow, week_start};
use feed::Cadence;

/// One cell of the calendar grid. `column` counts calendar weeks from
/// the week containing the window's first cell, `row` is the weekday
/// (Sunday = 0, fixed 0 for weekly cadence).
///
/// `value` is absent when no records fell on the cell's date. Zero is a
/// real reading and never stands in for "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl GridCell {
    pub fn has_data(&self) -> bool {
        self.value.is_some()
    }
}

/// Binds aggregated buckets onto the window's grid. Every date the
/// window enumerates becomes exactly one cell whether or not data
/// exists for it; buckets outside the window are never bound.
pub fn bind(window: &DisplayWindow, buckets: &Buckets, transform: &ValueTransform) -> Vec<GridCell> {
    let dates = window.dates();

    let Some(first) = dates.first() else {
        return Vec::new();
    };
    let anchor = week_start(*first);

    dates
        .iter()
        .map(|date| GridCell {
            column: ((*date - anchor).num_days() / 7) as u32,
            row: match window.cadence {
                Cadence::Day => date.weekday().num_days_from_sunday(),
                Cadence::Week => 0,
            },
            date: *date,
            value: buckets.get(date).map(|raw| transform.apply(*raw)),
        })
        .collect()
}

/// Week columns the grid spans, leading partial week included.
pub fn column_count(window: &DisplayWindow) -> u32 {
    match window.cadence {
        Cadence::Day => ((window.end - week_start(window.start)).num_days() / 7 + 1) as u32,
        Cadence::Week => window.week_starts().count() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggr::Buckets;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Sat 2023-12-23 ..= Sat 2024-01-06
    fn two_week_window(cadence: Cadence) -> DisplayWindow {
        DisplayWindow::compute(date(2024, 1, 3), 2, cadence).unwrap()
    }

    #[test]
    fn daily_grid_has_one_cell_per_day() {
        let cells = bind(
            &two_week_window(Cadence::Day),
            &Buckets::new(),
            &ValueTransform::default(),
        );

        assert_eq!(cells.len(), 15);
        assert!(cells.iter().all(|cell| cell.value.is_none()));
    }

    #[test]
    fn leading_partial_week_sits_in_column_zero() {
        let cells = bind(
            &two_week_window(Cadence::Day),
            &Buckets::new(),
            &ValueTransform::default(),
        );

        // window starts on a Saturday, alone in its calendar week
        assert_eq!(cells[0].date, date(2023, 12, 23));
        assert_eq!((cells[0].column, cells[0].row), (0, 6));

        // the following Sunday opens the next column
        assert_eq!(cells[1].date, date(2023, 12, 24));
        assert_eq!((cells[1].column, cells[1].row), (1, 0));

        let last = cells.last().unwrap();
        assert_eq!(last.date, date(2024, 1, 6));
        assert_eq!((last.column, last.row), (2, 6));
    }

    #[test]
    fn rows_follow_the_weekday() {
        let window = two_week_window(Cadence::Day);
        let cells = bind(&window, &Buckets::new(), &ValueTransform::default());

        for cell in &cells {
            assert_eq!(cell.row, cell.date.weekday().num_days_from_sunday());
            assert!(cell.row <= 6);
            assert!(window.contains(cell.date));
        }
    }

    #[test]
    fn values_bind_by_date_with_transform_applied() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2023, 12, 25), 1.0);

        let transform = ValueTransform::new(0.0, 5.0, true).unwrap();
        let cells = bind(&two_week_window(Cadence::Day), &buckets, &transform);

        let christmas = cells
            .iter()
            .find(|cell| cell.date == date(2023, 12, 25))
            .unwrap();
        assert_eq!(christmas.value, Some(4.0));
        assert_eq!(cells.iter().filter(|cell| cell.has_data()).count(), 1);
    }

    #[test]
    fn zero_is_data_not_absence() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2023, 12, 25), 0.0);

        let cells = bind(
            &two_week_window(Cadence::Day),
            &buckets,
            &ValueTransform::default(),
        );

        let christmas = cells
            .iter()
            .find(|cell| cell.date == date(2023, 12, 25))
            .unwrap();
        assert_eq!(christmas.value, Some(0.0));
        assert!(christmas.has_data());
    }

    #[test]
    fn out_of_window_buckets_are_never_bound() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2023, 12, 22), 3.0);
        buckets.insert(date(2024, 1, 7), 3.0);

        let cells = bind(
            &two_week_window(Cadence::Day),
            &buckets,
            &ValueTransform::default(),
        );

        assert!(cells.iter().all(|cell| cell.value.is_none()));
    }

    #[test]
    fn weekly_grid_is_one_cell_per_week() {
        let mut buckets = Buckets::new();
        buckets.insert(date(2023, 12, 24), 2.0);

        let cells = bind(
            &two_week_window(Cadence::Week),
            &buckets,
            &ValueTransform::default(),
        );

        assert_eq!(cells.len(), 2);
        assert_eq!(
            (cells[0].column, cells[0].row, cells[0].date, cells[0].value),
            (0, 0, date(2023, 12, 24), Some(2.0))
        );
        assert_eq!(
            (cells[1].column, cells[1].row, cells[1].date, cells[1].value),
            (1, 0, date(2023, 12, 31), None)
        );
    }

    #[test]
    fn column_count_matches_the_grid() {
        let daily = two_week_window(Cadence::Day);
        let cells = bind(&daily, &Buckets::new(), &ValueTransform::default());
        let max_column = cells.iter().map(|cell| cell.column).max().unwrap();

        assert_eq!(column_count(&daily), max_column + 1);
        assert_eq!(column_count(&daily), 3);

        assert_eq!(column_count(&two_week_window(Cadence::Week)), 2);
    }

    #[test]
    fn cells_without_data_serialize_without_a_value_field() {
        let cell = GridCell {
            column: 0,
            row: 6,
            date: date(2023, 12, 23),
            value: None,
        };
        let json = serde_json::to_value(cell).unwrap();

        assert!(json.get("value").is_none());
        assert_eq!(json.get("column"), Some(&serde_json::json!(0)));

        let filled = GridCell {
            value: Some(4.0),
            ..cell
        };
        let json = serde_json::to_value(filled).unwrap();
        assert_eq!(json.get("value"), Some(&serde_json::json!(4.0)));
    }
}
