//! Month calendar grid for the journal view.
//!
//! The grid is always six Sunday-first weeks (42 cells), padded with the
//! tail of the previous month and the head of the next. Only days of the
//! displayed month open the entry form.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::HealthRecord;

pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A displayed month.
///
/// Only months whose whole grid, and whose following month, lie inside
/// chrono's date range can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    first: NaiveDate,
    grid_start: NaiveDate,
    days: u32,
}

impl CalendarMonth {
    /// `None` when `month` is outside 1–12 or the month sits at the edge
    /// of the representable date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1)?, 1)
        } else {
            (year, month + 1)
        };
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
        let days = u32::try_from((next_first - first).num_days()).ok()?;

        let lead = i64::from(first.weekday().num_days_from_sunday());
        let grid_start = first.checked_sub_signed(Duration::days(lead))?;
        grid_start.checked_add_signed(Duration::days(GRID_CELLS as i64 - 1))?;

        Some(Self {
            year,
            month,
            first,
            grid_start,
            days,
        })
    }

    /// The month containing `date`, if it can be displayed.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// `None` past the earliest displayable month.
    pub fn previous(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// `None` past the latest displayable month.
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn days_in_month(&self) -> u32 {
        self.days
    }

    /// Heading such as "June 2025".
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month, 1–31.
    pub day: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub record: Option<HealthRecord>,
    /// Clicking opens the entry form for this date.
    pub selectable: bool,
}

/// The 42 cells for `month`, starting on the Sunday on or before the 1st.
pub fn month_grid(month: CalendarMonth, records: &[HealthRecord], today: NaiveDate) -> Vec<CalendarDay> {
    let by_date: HashMap<NaiveDate, &HealthRecord> = records.iter().map(|r| (r.date, r)).collect();

    (0..GRID_CELLS as i64)
        .map_while(|offset| month.grid_start.checked_add_signed(Duration::days(offset)))
        .map(|date| {
            let in_current_month = date.year() == month.year && date.month() == month.month;
            CalendarDay {
                date,
                day: date.day(),
                in_current_month,
                is_today: date == today,
                record: by_date.get(&date).map(|r| (*r).clone()),
                selectable: in_current_month,
            }
        })
        .collect()
}
