use chrono::NaiveDateTime;
use serde::Serialize;

/// Collection-wide overview.
///
/// Sections backed by optional metadata are `None` (and omitted from JSON)
/// when no photo supplies the field, so they never read as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_photos: usize,
    pub unique_cameras: usize,
    pub unique_lenses: usize,
    pub photos_with_gps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_stats: Option<IsoStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture_stats: Option<ApertureStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
    /// Whole days between earliest and latest.
    pub span_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsoStats {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApertureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Ties go to the smallest f-number.
    pub most_common: f64,
}

impl DateRange {
    pub fn from_timestamps<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let mut iter = timestamps.into_iter();
        let first = iter.next()?;
        let (earliest, latest) = iter.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));

        Some(Self {
            earliest,
            latest,
            span_days: (latest - earliest).num_days(),
        })
    }
}

impl IsoStats {
    pub fn from_values(values: &[u32]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let sum: u64 = values.iter().map(|&v| v as u64).sum();

        Some(Self {
            min,
            max,
            mean: sum as f64 / values.len() as f64,
        })
    }
}

impl ApertureStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        let most_common = mode(&sorted)?;

        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            most_common,
        })
    }
}

/// Most frequent value of an ascending slice. The first run to reach the
/// top count wins, which makes ties resolve to the smallest value.
fn mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..]
            .iter()
            .take_while(|v| v.total_cmp(&value).is_eq())
            .count();
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        i += run;
    }
    best.map(|(value, _)| value)
}
