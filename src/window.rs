use chrono::{Datelike, Duration, NaiveDate};

use crate::ConfigError;
use feed::Cadence;

/// Weeks of history shown when the caller doesn't ask for a specific span.
pub const DEFAULT_WEEKS: u32 = 18;

/// The date range a chart covers. Weeks run Sunday through Saturday, so
/// the window always ends on the Saturday closing the current week and
/// spans a whole number of weeks back from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cadence: Cadence,
}

impl DisplayWindow {
    /// Window ending at the Saturday after `today`. When `today` already
    /// is a Saturday the window extends through the following week, so
    /// the current (just-started) week still gets a full column.
    pub fn compute(today: NaiveDate, weeks: u32, cadence: Cadence) -> Result<Self, ConfigError> {
        if weeks == 0 {
            return Err(ConfigError::ZeroWeeks);
        }

        let until_saturday = 6 - today.weekday().num_days_from_sunday();
        let end = if until_saturday == 0 {
            today + Duration::days(7)
        } else {
            today + Duration::days(i64::from(until_saturday))
        };
        let start = end - Duration::days(7 * i64::from(weeks));

        Ok(Self {
            start,
            end,
            cadence,
        })
    }

    pub fn current(weeks: u32, cadence: Cadence) -> Result<Self, ConfigError> {
        Self::compute(chrono::Local::now().date_naive(), weeks, cadence)
    }

    pub fn weeks(&self) -> u32 {
        ((self.end - self.start).num_days() / 7) as u32
    }

    /// Both bounds are part of the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The dates the grid will show, one per cell, in order: every day
    /// for daily cadence, every in-window Sunday for weekly.
    pub fn dates(self) -> Vec<NaiveDate> {
        match self.cadence {
            Cadence::Day => self.days().collect(),
            Cadence::Week => self.week_starts().collect(),
        }
    }

    /// Every date in the window, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start
            .iter_days()
            .take_while(move |date| *date <= self.end)
    }

    /// The Sundays lying inside the window, one per week cell.
    pub fn week_starts(self) -> impl Iterator<Item = NaiveDate> {
        let first = week_start(self.start);
        let first_inside = if first < self.start {
            first + Duration::days(7)
        } else {
            first
        };

        std::iter::successors(Some(first_inside), |sunday| Some(*sunday + Duration::days(7)))
            .take_while(move |sunday| *sunday <= self.end)
    }

    /// Range label shown under a chart, e.g. `Sep 09 2023 - Jan 13 2024`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %d %Y"),
            self.end.format("%b %d %Y")
        )
    }
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
