//! Row types for the derived tables.

use chrono::{NaiveDate, Timelike, Weekday};
use serde::Serialize;

/// Photos per camera or lens name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRow {
    pub name: String,
    pub photos: usize,
}

/// Photos per distinct numeric setting (ISO, f-number, focal length...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    /// First day of the bucket.
    pub bucket: NaiveDate,
    pub photos: usize,
}

/// Photos per fixed category (time of day, weekday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount<C> {
    pub category: C,
    pub photos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsRow {
    pub filename: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrientationCounts {
    pub portrait: usize,
    pub landscape: usize,
}

impl OrientationCounts {
    pub fn total(&self) -> usize {
        self.portrait + self.landscape
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlashCounts {
    pub used: usize,
    pub not_used: usize,
}

impl FlashCounts {
    pub fn total(&self) -> usize {
        self.used + self.not_used
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Named range of the local hour a photo was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeOfDay {
    /// 00:00 to 05:59
    Night,
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 17:59
    Afternoon,
    /// 18:00 to 23:59
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Night,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn of<T: Timelike>(time: &T) -> Self {
        Self::from_hour(time.hour())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Night => "Night",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    /// Position in [`TimeOfDay::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `f/2.8`, `f/8`
pub fn aperture_label(f_number: f64) -> String {
    format!("f/{}", f_number)
}

/// `1/250s` for fast shutters, `2s` for long exposures.
pub fn shutter_label(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{}s", (1.0 / seconds).round())
    } else {
        format!("{}s", seconds)
    }
}
