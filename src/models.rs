use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// The closed set of moods a day can be marked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoodCode {
    A,
    C,
    F,
}

impl MoodCode {
    pub const ALL: [MoodCode; 3] = [MoodCode::A, MoodCode::C, MoodCode::F];

    pub fn code(self) -> &'static str {
        match self {
            MoodCode::A => "A",
            MoodCode::C => "C",
            MoodCode::F => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodCode::A => "Happy",
            MoodCode::C => "Okay",
            MoodCode::F => "Sad",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MoodCode::A => "#4CAF50",
            MoodCode::C => "#FFEB3B",
            MoodCode::F => "#E91E63",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood code '{}'", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for MoodCode {
    type Err = UnknownMood;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "A" => Ok(MoodCode::A),
            "C" => Ok(MoodCode::C),
            "F" => Ok(MoodCode::F),
            other => Err(UnknownMood(other.to_string())),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // chrono accepts unpadded fields, keys must be zero padded
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "month" => Some(ViewMode::Month),
            "year" => Some(ViewMode::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub date: String,
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub date: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub mood: Option<MoodCode>,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodStat {
    pub code: MoodCode,
    pub label: &'static str,
    pub color: &'static str,
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total: u64,
    pub moods: Vec<MoodStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Empty,
    Day {
        day: u32,
        date: String,
        mood: Option<MoodCode>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub days: u32,
    pub offset: u32,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}
