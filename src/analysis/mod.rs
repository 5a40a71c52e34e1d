//! Aggregation over a collection of [`PhotoRecord`]s.
//!
//! An [`Analyzer`] holds one immutable collection for an analysis session.
//! Every accessor recomputes its table from scratch, filters on the fields it
//! needs before grouping, and returns an empty table rather than an error
//! when nothing qualifies. The only failure is an unknown timeline
//! granularity.

pub mod summary;
pub mod tables;
pub mod timeline;

use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::record::{GpsCoordinate, Orientation, PhotoRecord};

pub use summary::{ApertureStats, DateRange, IsoStats, SummaryReport};
pub use tables::{
    CategoryCount, FlashCounts, GpsRow, OrientationCounts, TimeOfDay, TimelineRow, UsageRow,
    ValueCount, WEEKDAYS,
};
pub use timeline::Granularity;

#[derive(Debug, Clone)]
pub struct Analyzer {
    records: Arc<[PhotoRecord]>,
}

impl Analyzer {
    pub fn new(records: Vec<PhotoRecord>) -> Self {
        tracing::debug!(photos = records.len(), "Analyzer created");
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn total_photos(&self) -> usize {
        self.records.len()
    }

    /// Values of one optional field, skipping records where it is absent.
    pub fn present<'a, T, F>(&'a self, field: F) -> impl Iterator<Item = T> + 'a
    where
        T: 'a,
        F: Fn(&'a PhotoRecord) -> Option<T> + 'a,
    {
        self.records.iter().filter_map(field)
    }

    pub fn camera_usage(&self) -> Vec<UsageRow> {
        self.usage(|r| r.camera_model.as_deref())
    }

    pub fn lens_usage(&self) -> Vec<UsageRow> {
        self.usage(|r| r.lens_model.as_deref())
    }

    pub fn iso_distribution(&self) -> Vec<ValueCount<u32>> {
        self.distribution(|r| r.iso, u32::cmp)
    }

    pub fn aperture_distribution(&self) -> Vec<ValueCount<f64>> {
        self.distribution(|r| r.aperture, f64::total_cmp)
    }

    pub fn focal_length_distribution(&self) -> Vec<ValueCount<f64>> {
        self.distribution(|r| r.focal_length, f64::total_cmp)
    }

    /// Exposure times in seconds, fastest first.
    pub fn shutter_speed_distribution(&self) -> Vec<ValueCount<f64>> {
        self.distribution(|r| r.exposure_time, f64::total_cmp)
    }

    pub fn shooting_timeline(&self, granularity: Granularity) -> Vec<TimelineRow> {
        timeline::bucket_counts(self.present(|r| r.timestamp), granularity)
    }

    /// Like [`Analyzer::shooting_timeline`] for a granularity that comes from
    /// user input. Unknown names are rejected before any bucketing happens.
    pub fn shooting_timeline_for(&self, granularity: &str) -> Result<Vec<TimelineRow>> {
        let granularity: Granularity = granularity.parse()?;
        Ok(self.shooting_timeline(granularity))
    }

    /// All four ranges in fixed order once any photo has a timestamp.
    pub fn time_of_day_distribution(&self) -> Vec<CategoryCount<TimeOfDay>> {
        let mut counts = [0usize; 4];
        let mut any = false;
        for ts in self.present(|r| r.timestamp) {
            counts[TimeOfDay::of(&ts).index()] += 1;
            any = true;
        }
        if !any {
            return Vec::new();
        }

        TimeOfDay::ALL
            .iter()
            .zip(counts)
            .map(|(&category, photos)| CategoryCount { category, photos })
            .collect()
    }

    /// Monday through Sunday once any photo has a timestamp.
    pub fn day_of_week_distribution(&self) -> Vec<CategoryCount<chrono::Weekday>> {
        let mut counts = [0usize; 7];
        let mut any = false;
        for ts in self.present(|r| r.timestamp) {
            counts[ts.weekday().num_days_from_monday() as usize] += 1;
            any = true;
        }
        if !any {
            return Vec::new();
        }

        WEEKDAYS
            .iter()
            .zip(counts)
            .map(|(&category, photos)| CategoryCount { category, photos })
            .collect()
    }

    pub fn gps_photos(&self) -> Vec<GpsRow> {
        self.records
            .iter()
            .filter_map(|r| {
                r.gps.map(|g| GpsRow {
                    filename: r.filename.clone(),
                    latitude: g.latitude,
                    longitude: g.longitude,
                })
            })
            .collect()
    }

    /// Mean position of the GPS-tagged photos, for centring a map.
    pub fn gps_center(&self) -> Option<GpsCoordinate> {
        let (n, lat, lon) = self
            .present(|r| r.gps)
            .fold((0usize, 0.0, 0.0), |(n, lat, lon), g| {
                (n + 1, lat + g.latitude, lon + g.longitude)
            });
        if n == 0 {
            return None;
        }
        Some(GpsCoordinate {
            latitude: lat / n as f64,
            longitude: lon / n as f64,
        })
    }

    pub fn orientation_counts(&self) -> OrientationCounts {
        self.present(|r| r.orientation)
            .fold(OrientationCounts::default(), |mut acc, o| {
                match o {
                    Orientation::Portrait => acc.portrait += 1,
                    Orientation::Landscape => acc.landscape += 1,
                }
                acc
            })
    }

    pub fn flash_usage(&self) -> FlashCounts {
        self.present(|r| r.flash_fired)
            .fold(FlashCounts::default(), |mut acc, fired| {
                if fired {
                    acc.used += 1;
                } else {
                    acc.not_used += 1;
                }
                acc
            })
    }

    pub fn summary_report(&self) -> SummaryReport {
        let unique_cameras = self
            .present(|r| r.camera_model.as_deref())
            .collect::<HashSet<_>>()
            .len();
        let unique_lenses = self
            .present(|r| r.lens_model.as_deref())
            .collect::<HashSet<_>>()
            .len();
        let isos: Vec<u32> = self.present(|r| r.iso).collect();
        let apertures: Vec<f64> = self.present(|r| r.aperture).collect();

        SummaryReport {
            total_photos: self.total_photos(),
            unique_cameras,
            unique_lenses,
            photos_with_gps: self.present(|r| r.gps).count(),
            date_range: DateRange::from_timestamps(self.present(|r| r.timestamp)),
            iso_stats: IsoStats::from_values(&isos),
            aperture_stats: ApertureStats::from_values(&apertures),
        }
    }

    /// Count per exact name, most used first. Equal counts fall back to name
    /// order so output is stable.
    fn usage<'a, F>(&'a self, field: F) -> Vec<UsageRow>
    where
        F: Fn(&'a PhotoRecord) -> Option<&'a str> + 'a,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for name in self.present(field) {
            *counts.entry(name).or_insert(0) += 1;
        }

        let mut rows: Vec<UsageRow> = counts
            .into_iter()
            .map(|(name, photos)| UsageRow {
                name: name.to_string(),
                photos,
            })
            .collect();
        rows.sort_by(|a, b| b.photos.cmp(&a.photos).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    /// One bucket per distinct value, ascending by value.
    fn distribution<'a, T, F>(&'a self, field: F, cmp: fn(&T, &T) -> Ordering) -> Vec<ValueCount<T>>
    where
        T: Copy + 'a,
        F: Fn(&'a PhotoRecord) -> Option<T> + 'a,
    {
        let mut values: Vec<T> = self.present(field).collect();
        values.sort_by(cmp);

        let mut rows: Vec<ValueCount<T>> = Vec::new();
        for value in values {
            match rows.last_mut() {
                Some(last) if cmp(&last.value, &value).is_eq() => last.count += 1,
                _ => rows.push(ValueCount { value, count: 1 }),
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{NaiveDate, NaiveDateTime, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn photo(name: &str) -> PhotoRecord {
        PhotoRecord::new(name)
    }

    fn scenario() -> Analyzer {
        let mut a = photo("a.jpg");
        a.camera_model = Some("A".to_string());
        a.iso = Some(100);
        a.timestamp = Some(at(2024, 1, 1, 10));

        let mut b = photo("b.jpg");
        b.camera_model = Some("A".to_string());
        b.iso = Some(200);
        b.timestamp = Some(at(2024, 1, 3, 10));

        let mut c = photo("c.jpg").with_location(Some(1.0), Some(2.0));
        c.camera_model = Some("B".to_string());
        c.iso = Some(100);
        c.timestamp = Some(at(2024, 1, 1, 20));

        Analyzer::new(vec![a, b, c])
    }

    #[test]
    fn test_three_photo_scenario() {
        let analyzer = scenario();

        assert_eq!(
            analyzer.camera_usage(),
            vec![
                UsageRow { name: "A".to_string(), photos: 2 },
                UsageRow { name: "B".to_string(), photos: 1 },
            ]
        );
        assert_eq!(
            analyzer.iso_distribution(),
            vec![ValueCount { value: 100, count: 2 }, ValueCount { value: 200, count: 1 }]
        );

        let gps = analyzer.gps_photos();
        assert_eq!(gps.len(), 1);
        assert_eq!(gps[0].filename, "c.jpg");

        let timeline = analyzer.shooting_timeline(Granularity::Day);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].bucket, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(timeline[2].bucket, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(timeline.iter().map(|r| r.photos).collect::<Vec<_>>(), vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_collection() {
        let analyzer = Analyzer::new(Vec::new());

        assert!(analyzer.camera_usage().is_empty());
        assert!(analyzer.lens_usage().is_empty());
        assert!(analyzer.iso_distribution().is_empty());
        assert!(analyzer.aperture_distribution().is_empty());
        assert!(analyzer.focal_length_distribution().is_empty());
        assert!(analyzer.shutter_speed_distribution().is_empty());
        for g in Granularity::ALL {
            assert!(analyzer.shooting_timeline(g).is_empty());
        }
        assert!(analyzer.time_of_day_distribution().is_empty());
        assert!(analyzer.day_of_week_distribution().is_empty());
        assert!(analyzer.gps_photos().is_empty());
        assert!(analyzer.gps_center().is_none());
        assert!(analyzer.orientation_counts().is_empty());
        assert!(analyzer.flash_usage().is_empty());

        let summary = analyzer.summary_report();
        assert_eq!(summary.total_photos, 0);
        assert!(summary.date_range.is_none());
        assert!(summary.iso_stats.is_none());
        assert!(summary.aperture_stats.is_none());
    }

    #[test]
    fn test_bare_records_only_count_toward_total() {
        let analyzer = Analyzer::new(vec![photo("x.jpg"), photo("y.jpg")]);

        let summary = analyzer.summary_report();
        assert_eq!(summary.total_photos, 2);
        assert_eq!(summary.unique_cameras, 0);
        assert_eq!(summary.photos_with_gps, 0);
        assert!(summary.date_range.is_none());
        assert!(analyzer.camera_usage().is_empty());
        assert!(analyzer.time_of_day_distribution().is_empty());
    }

    #[test]
    fn test_missing_fields_are_excluded() {
        let mut with = photo("with.jpg");
        with.camera_model = Some("Canon EOS R5".to_string());
        with.lens_model = Some("RF 24-70mm".to_string());
        with.aperture = Some(4.0);

        let mut other_case = photo("lower.jpg");
        other_case.camera_model = Some("canon eos r5".to_string());

        let analyzer = Analyzer::new(vec![with, other_case, photo("none.jpg")]);

        let cameras = analyzer.camera_usage();
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras.iter().map(|r| r.photos).sum::<usize>(), 2);

        let lenses = analyzer.lens_usage();
        assert_eq!(lenses.len(), 1);
        assert_eq!(lenses[0].photos, 1);

        assert_eq!(analyzer.aperture_distribution(), vec![ValueCount { value: 4.0, count: 1 }]);
        assert!(analyzer.iso_distribution().is_empty());
    }

    #[test]
    fn test_distributions_sorted_by_value() {
        let records = [(6400, 2.8, 50.0), (100, 8.0, 24.0), (6400, 1.8, 50.0), (800, 2.8, 200.0)]
            .iter()
            .enumerate()
            .map(|(i, &(iso, aperture, focal))| {
                let mut r = photo(&format!("{i}.jpg"));
                r.iso = Some(iso);
                r.aperture = Some(aperture);
                r.focal_length = Some(focal);
                r
            })
            .collect();
        let analyzer = Analyzer::new(records);

        let isos: Vec<u32> = analyzer.iso_distribution().iter().map(|r| r.value).collect();
        assert_eq!(isos, vec![100, 800, 6400]);

        let apertures: Vec<(f64, usize)> = analyzer
            .aperture_distribution()
            .iter()
            .map(|r| (r.value, r.count))
            .collect();
        assert_eq!(apertures, vec![(1.8, 1), (2.8, 2), (8.0, 1)]);

        let focal: Vec<f64> = analyzer.focal_length_distribution().iter().map(|r| r.value).collect();
        assert_eq!(focal, vec![24.0, 50.0, 200.0]);
    }

    #[test]
    fn test_fixed_categories_with_single_record() {
        let mut r = photo("one.jpg");
        // Wednesday morning
        r.timestamp = Some(at(2024, 1, 3, 7));
        let analyzer = Analyzer::new(vec![r]);

        let tod = analyzer.time_of_day_distribution();
        assert_eq!(
            tod.iter().map(|c| c.category).collect::<Vec<_>>(),
            TimeOfDay::ALL.to_vec()
        );
        assert_eq!(tod.iter().map(|c| c.photos).collect::<Vec<_>>(), vec![0, 1, 0, 0]);

        let dow = analyzer.day_of_week_distribution();
        assert_eq!(dow.len(), 7);
        assert_eq!(dow[0].category, Weekday::Mon);
        assert_eq!(dow[6].category, Weekday::Sun);
        assert_eq!(dow.iter().map(|c| c.photos).collect::<Vec<_>>(), vec![0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_gps_subset_and_center() {
        let records = vec![
            photo("lat_only.jpg").with_location(Some(10.0), None),
            photo("p1.jpg").with_location(Some(10.0), Some(20.0)),
            photo("p2.jpg").with_location(Some(-10.0), Some(40.0)),
        ];
        let analyzer = Analyzer::new(records);

        assert_eq!(analyzer.gps_photos().len(), 2);
        assert_eq!(analyzer.summary_report().photos_with_gps, 2);

        let center = analyzer.gps_center().unwrap();
        assert!((center.latitude - 0.0).abs() < 1e-9);
        assert!((center.longitude - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_orientation_and_flash() {
        let mut p = photo("p.jpg");
        p.orientation = Some(Orientation::Portrait);
        p.flash_fired = Some(true);
        let mut l = photo("l.jpg");
        l.orientation = Some(Orientation::Landscape);
        l.flash_fired = Some(false);
        let mut l2 = photo("l2.jpg");
        l2.orientation = Some(Orientation::Landscape);

        let analyzer = Analyzer::new(vec![p, l, l2, photo("bare.jpg")]);

        assert_eq!(analyzer.orientation_counts(), OrientationCounts { portrait: 1, landscape: 2 });
        assert_eq!(analyzer.flash_usage(), FlashCounts { used: 1, not_used: 1 });
    }

    #[test]
    fn test_summary_report() {
        let mut a = photo("a.jpg");
        a.camera_model = Some("X100V".to_string());
        a.lens_model = Some("23mm".to_string());
        a.iso = Some(160);
        a.aperture = Some(2.0);
        a.timestamp = Some(at(2023, 12, 30, 9));

        let mut b = photo("b.jpg");
        b.camera_model = Some("X100V".to_string());
        b.iso = Some(640);
        b.aperture = Some(5.6);
        b.timestamp = Some(at(2024, 1, 4, 9));

        let summary = Analyzer::new(vec![a, b, photo("c.jpg")]).summary_report();
        assert_eq!(summary.total_photos, 3);
        assert_eq!(summary.unique_cameras, 1);
        assert_eq!(summary.unique_lenses, 1);

        let range = summary.date_range.unwrap();
        assert_eq!(range.span_days, 5);

        let iso = summary.iso_stats.unwrap();
        assert_eq!((iso.min, iso.max), (160, 640));
        assert!((iso.mean - 400.0).abs() < 1e-9);

        let aperture = summary.aperture_stats.unwrap();
        assert_eq!(aperture.most_common, 2.0);
    }

    #[test]
    fn test_invalid_granularity() {
        let analyzer = scenario();
        assert!(matches!(
            analyzer.shooting_timeline_for("hourly"),
            Err(Error::InvalidGranularity(_))
        ));
        assert_eq!(analyzer.shooting_timeline_for("D").unwrap().len(), 3);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let analyzer = scenario();

        assert_eq!(analyzer.camera_usage(), analyzer.camera_usage());
        assert_eq!(analyzer.iso_distribution(), analyzer.iso_distribution());
        assert_eq!(
            analyzer.shooting_timeline(Granularity::Week),
            analyzer.shooting_timeline(Granularity::Week)
        );
        assert_eq!(analyzer.time_of_day_distribution(), analyzer.time_of_day_distribution());
        assert_eq!(analyzer.gps_photos(), analyzer.gps_photos());
        assert_eq!(analyzer.summary_report(), analyzer.summary_report());
    }

    #[test]
    fn test_shared_across_threads() {
        let analyzer = scenario();
        let clone = analyzer.clone();
        let handle = std::thread::spawn(move || clone.camera_usage());
        assert_eq!(handle.join().unwrap(), analyzer.camera_usage());
    }
}
