use crate::models::{GridCell, MonthGrid, YearGrid, date_key};
use crate::tracker::MoodMap;
use chrono::{Datelike, Months, NaiveDate};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKDAYS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

/// Years chrono can represent a full calendar for.
pub fn is_supported_year(year: i32) -> bool {
    (NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year)
}

/// Year and zero-based month currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    pub year: i32,
    pub month: u32,
}

impl NavigationCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year: year.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year()),
            month: month.min(11),
        }
    }

    pub fn at(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Stays put when the move would leave the supported years.
    pub fn shift_month(self, delta: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) + i64::from(delta);
        match i32::try_from(index.div_euclid(12)) {
            Ok(year) if is_supported_year(year) => Self {
                year,
                month: index.rem_euclid(12) as u32,
            },
            _ => self,
        }
    }

    pub fn shift_year(self, delta: i32) -> Self {
        match self.year.checked_add(delta) {
            Some(year) if is_supported_year(year) => Self {
                year,
                month: self.month,
            },
            _ => self,
        }
    }

    pub fn title(self) -> String {
        format!("{} {}", MONTHS[self.month as usize], self.year)
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = first_of_month(year, month) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next_first) => (next_first - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Weekday of the 1st counted from Monday.
pub fn monday_offset(year: i32, month: u32) -> u32 {
    first_of_month(year, month)
        .map(|first| first.weekday().num_days_from_monday())
        .unwrap_or(0)
}

pub fn build_month_grid(year: i32, month: u32, moods: &MoodMap) -> MonthGrid {
    let days = days_in_month(year, month);
    let offset = monday_offset(year, month);

    let mut cells = Vec::with_capacity((offset + days) as usize);
    cells.extend((0..offset).map(|_| GridCell::Empty));
    for day in 1..=days {
        let Some(date) = NaiveDate::from_ymd_opt(year, month + 1, day) else {
            continue;
        };
        cells.push(GridCell::Day {
            day,
            date: date_key(date),
            mood: moods.get(&date).copied(),
        });
    }

    MonthGrid {
        year,
        month,
        title: NavigationCursor::new(year, month).title(),
        days,
        offset,
        cells,
    }
}

pub fn build_year_grid(year: i32, moods: &MoodMap) -> YearGrid {
    YearGrid {
        year,
        months: (0..12).map(|month| build_month_grid(year, month, moods)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodCode;

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn month_lengths_vary() {
        let lengths: Vec<u32> = (0..12).map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn offset_starts_week_on_monday() {
        // 2024-01-01 is a Monday
        assert_eq!(monday_offset(2024, 0), 0);
        // 2023-01-01 is a Sunday
        assert_eq!(monday_offset(2023, 0), 6);
        // 2024-03-01 is a Friday
        assert_eq!(monday_offset(2024, 2), 4);
    }

    #[test]
    fn grid_has_placeholders_then_days() {
        let mut moods = MoodMap::new();
        moods.insert(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), MoodCode::A);

        let grid = build_month_grid(2024, 2, &moods);
        assert_eq!(grid.title, "Mar 2024");
        assert_eq!(grid.offset, 4);
        assert_eq!(grid.cells.len(), 4 + 31);
        assert!(grid.cells[..4].iter().all(|cell| *cell == GridCell::Empty));
        assert_eq!(
            grid.cells[4],
            GridCell::Day {
                day: 1,
                date: "2024-03-01".to_string(),
                mood: None
            }
        );
        assert_eq!(
            grid.cells[8],
            GridCell::Day {
                day: 5,
                date: "2024-03-05".to_string(),
                mood: Some(MoodCode::A)
            }
        );
    }

    #[test]
    fn month_navigation_rolls_over_years() {
        let december = NavigationCursor::new(2023, 11);
        assert_eq!(december.shift_month(1), NavigationCursor::new(2024, 0));

        let january = NavigationCursor::new(2024, 0);
        assert_eq!(january.shift_month(-1), NavigationCursor::new(2023, 11));
        assert_eq!(january.shift_month(-13), NavigationCursor::new(2022, 11));
        assert_eq!(january.shift_month(5), NavigationCursor::new(2024, 5));
    }

    #[test]
    fn year_navigation_keeps_month() {
        let cursor = NavigationCursor::new(2024, 1);
        assert_eq!(cursor.shift_year(-1), NavigationCursor::new(2023, 1));
        assert_eq!(cursor.shift_year(1).title(), "Feb 2025");
    }

    #[test]
    fn navigation_stops_at_supported_years() {
        let last = NavigationCursor::new(i32::MAX, 11);
        assert!(is_supported_year(last.year));
        assert_eq!(last.shift_month(1), last);
        assert_eq!(last.shift_year(1), last);
        assert_eq!(last.shift_month(-1), NavigationCursor::new(last.year, 10));

        let first = NavigationCursor::new(i32::MIN, 0);
        assert!(is_supported_year(first.year));
        assert_eq!(first.shift_month(-1), first);
        assert_eq!(first.shift_year(-1), first);
        assert!(!is_supported_year(i32::MAX));
        assert_eq!(days_in_month(last.year, 11), 31);
        assert_eq!(days_in_month(first.year, 0), 31);
    }

    #[test]
    fn year_grid_covers_every_day() {
        let grid = build_year_grid(2024, &MoodMap::new());
        assert_eq!(grid.months.len(), 12);
        let total: u32 = grid.months.iter().map(|month| month.days).sum();
        assert_eq!(total, 366);
        assert_eq!(grid.months[11].title, "Dec 2024");
    }
}
