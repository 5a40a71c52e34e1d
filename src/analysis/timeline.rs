//! Calendar-aligned bucketing for the shooting timeline.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::tables::TimelineRow;
use crate::error::Error;

/// Width of a timeline bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    /// Weeks start on Monday.
    Week,
    #[default]
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Day => "Daily",
            Granularity::Week => "Weekly",
            Granularity::Month => "Monthly",
            Granularity::Year => "Yearly",
        }
    }

    /// First day of the bucket containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let offset = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    /// Start of the bucket following the one starting at `start`.
    pub fn next_bucket(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_add_days(Days::new(1)),
            Granularity::Week => start.checked_add_days(Days::new(7)),
            Granularity::Month => start.checked_add_months(Months::new(1)),
            Granularity::Year => start.checked_add_months(Months::new(12)),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Granularity::Day),
            "w" | "week" | "weekly" => Ok(Granularity::Week),
            "m" | "month" | "monthly" => Ok(Granularity::Month),
            "y" | "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(Error::InvalidGranularity(s.to_string())),
        }
    }
}

/// Walk every key from the first to the last present one, inserting zero
/// counts for keys `next` produces that have no entry.
pub fn fill_gaps<K, F>(counts: &BTreeMap<K, usize>, next: F) -> Vec<(K, usize)>
where
    K: Ord + Copy,
    F: Fn(K) -> Option<K>,
{
    let (Some((&first, _)), Some((&last, _))) = (counts.first_key_value(), counts.last_key_value())
    else {
        return Vec::new();
    };

    let mut filled = Vec::new();
    let mut current = Some(first);
    while let Some(key) = current {
        if key > last {
            break;
        }
        filled.push((key, counts.get(&key).copied().unwrap_or(0)));
        current = next(key);
    }
    filled
}

/// Count timestamps per bucket, chronologically, with empty buckets between
/// the first and last observed ones filled in.
pub fn bucket_counts<I>(timestamps: I, granularity: Granularity) -> Vec<TimelineRow>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for ts in timestamps {
        *counts.entry(granularity.bucket_start(ts.date())).or_insert(0) += 1;
    }

    fill_gaps(&counts, |start| granularity.next_bucket(start))
        .into_iter()
        .map(|(bucket, photos)| TimelineRow { bucket, photos })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("Weekly".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("M".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(" year ".parse::<Granularity>().unwrap(), Granularity::Year);

        let err = "hourly".parse::<Granularity>().unwrap_err();
        assert!(matches!(err, Error::InvalidGranularity(ref s) if s == "hourly"));
    }

    #[test]
    fn test_bucket_start_is_calendar_aligned() {
        // 2024-03-14 is a Thursday
        assert_eq!(Granularity::Day.bucket_start(date(2024, 3, 14)), date(2024, 3, 14));
        assert_eq!(Granularity::Week.bucket_start(date(2024, 3, 14)), date(2024, 3, 11));
        assert_eq!(Granularity::Week.bucket_start(date(2024, 3, 11)), date(2024, 3, 11));
        assert_eq!(Granularity::Week.bucket_start(date(2024, 3, 17)), date(2024, 3, 11));
        assert_eq!(Granularity::Month.bucket_start(date(2024, 3, 14)), date(2024, 3, 1));
        assert_eq!(Granularity::Year.bucket_start(date(2024, 3, 14)), date(2024, 1, 1));
    }

    #[test]
    fn test_fill_gaps_empty() {
        let counts: BTreeMap<u32, usize> = BTreeMap::new();
        assert!(fill_gaps(&counts, |k| Some(k + 1)).is_empty());
    }

    #[test]
    fn test_daily_gap_fill() {
        let rows = bucket_counts(vec![at(2024, 1, 1), at(2024, 1, 3), at(2024, 1, 1)], Granularity::Day);
        let counts: Vec<usize> = rows.iter().map(|r| r.photos).collect();
        assert_eq!(counts, vec![2, 0, 1]);
        assert_eq!(rows[1].bucket, date(2024, 1, 2));
    }

    #[test]
    fn test_weekly_gap_fill() {
        let rows = bucket_counts(vec![at(2024, 1, 3), at(2024, 1, 24)], Granularity::Week);
        let buckets: Vec<NaiveDate> = rows.iter().map(|r| r.bucket).collect();
        assert_eq!(
            buckets,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
        let counts: Vec<usize> = rows.iter().map(|r| r.photos).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_monthly_gap_fill_crosses_year() {
        let rows = bucket_counts(vec![at(2023, 11, 30), at(2024, 2, 1)], Granularity::Month);
        let buckets: Vec<NaiveDate> = rows.iter().map(|r| r.bucket).collect();
        assert_eq!(
            buckets,
            vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1), date(2024, 2, 1)]
        );
        assert_eq!(rows.iter().map(|r| r.photos).sum::<usize>(), 2);
    }

    #[test]
    fn test_yearly_gap_fill() {
        let rows = bucket_counts(vec![at(2019, 6, 1), at(2021, 6, 1), at(2021, 7, 1)], Granularity::Year);
        let counts: Vec<usize> = rows.iter().map(|r| r.photos).collect();
        assert_eq!(counts, vec![1, 0, 2]);
        assert_eq!(rows[2].bucket, date(2021, 1, 1));
    }

    #[test]
    fn test_single_bucket() {
        let rows = bucket_counts(vec![at(2024, 5, 5)], Granularity::Month);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].photos, 1);
    }
}
