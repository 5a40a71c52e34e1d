//! Terminal and JSON rendering of the derived tables.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;

use crate::analysis::tables::{aperture_label, shutter_label, weekday_label};
use crate::analysis::{
    Analyzer, CategoryCount, FlashCounts, Granularity, GpsRow, OrientationCounts, SummaryReport,
    TimeOfDay, TimelineRow, UsageRow, ValueCount,
};
use crate::record::GpsCoordinate;

/// Display choices made once per session.
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub granularity: Granularity,
    pub show_gps: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            show_gps: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GpsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<GpsCoordinate>,
    pub photos: Vec<GpsRow>,
}

/// Every table for one analysis session.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: SummaryReport,
    pub camera_usage: Vec<UsageRow>,
    pub lens_usage: Vec<UsageRow>,
    pub iso_distribution: Vec<ValueCount<u32>>,
    pub aperture_distribution: Vec<ValueCount<f64>>,
    pub focal_length_distribution: Vec<ValueCount<f64>>,
    pub shutter_speed_distribution: Vec<ValueCount<f64>>,
    pub timeline_granularity: Granularity,
    pub timeline: Vec<TimelineRow>,
    pub time_of_day: Vec<CategoryCount<TimeOfDay>>,
    pub day_of_week: Vec<CategoryCount<Weekday>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsSection>,
    #[serde(skip_serializing_if = "OrientationCounts::is_empty")]
    pub orientation: OrientationCounts,
    #[serde(skip_serializing_if = "FlashCounts::is_empty")]
    pub flash: FlashCounts,
}

impl Dashboard {
    pub fn build(analyzer: &Analyzer, options: &DashboardOptions) -> Self {
        let gps = options.show_gps.then(|| GpsSection {
            center: analyzer.gps_center(),
            photos: analyzer.gps_photos(),
        });

        Self {
            summary: analyzer.summary_report(),
            camera_usage: analyzer.camera_usage(),
            lens_usage: analyzer.lens_usage(),
            iso_distribution: analyzer.iso_distribution(),
            aperture_distribution: analyzer.aperture_distribution(),
            focal_length_distribution: analyzer.focal_length_distribution(),
            shutter_speed_distribution: analyzer.shutter_speed_distribution(),
            timeline_granularity: options.granularity,
            timeline: analyzer.shooting_timeline(options.granularity),
            time_of_day: analyzer.time_of_day_distribution(),
            day_of_week: analyzer.day_of_week_distribution(),
            gps,
            orientation: analyzer.orientation_counts(),
            flash: analyzer.flash_usage(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(title.len()))
}

fn rows<I, L>(f: &mut fmt::Formatter<'_>, empty: &str, items: I) -> fmt::Result
where
    I: IntoIterator<Item = (L, usize)>,
    L: fmt::Display,
{
    let mut any = false;
    for (label, count) in items {
        writeln!(f, "  {:<32} {:>6}", label.to_string(), count)?;
        any = true;
    }
    if !any {
        writeln!(f, "  No {} data available", empty)?;
    }
    Ok(())
}

fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        heading(f, "Summary")?;
        writeln!(f, "  Total photos:     {}", s.total_photos)?;
        writeln!(f, "  Cameras used:     {}", s.unique_cameras)?;
        writeln!(f, "  Lenses used:      {}", s.unique_lenses)?;
        writeln!(f, "  Photos with GPS:  {}", s.photos_with_gps)?;

        heading(f, "Cameras")?;
        rows(f, "camera", self.camera_usage.iter().map(|r| (&r.name, r.photos)))?;

        heading(f, "Lenses")?;
        rows(f, "lens", self.lens_usage.iter().map(|r| (&r.name, r.photos)))?;

        heading(f, "ISO")?;
        rows(f, "ISO", self.iso_distribution.iter().map(|r| (r.value, r.count)))?;

        heading(f, "Aperture")?;
        rows(
            f,
            "aperture",
            self.aperture_distribution.iter().map(|r| (aperture_label(r.value), r.count)),
        )?;

        heading(f, "Focal length (mm)")?;
        rows(f, "focal length", self.focal_length_distribution.iter().map(|r| (r.value, r.count)))?;

        heading(f, "Shutter speed")?;
        rows(
            f,
            "shutter speed",
            self.shutter_speed_distribution.iter().map(|r| (shutter_label(r.value), r.count)),
        )?;

        heading(f, &format!("{} timeline", self.timeline_granularity.label()))?;
        rows(f, "date", self.timeline.iter().map(|r| (r.bucket, r.photos)))?;

        heading(f, "Time of day")?;
        rows(f, "time", self.time_of_day.iter().map(|c| (c.category.label(), c.photos)))?;

        heading(f, "Day of week")?;
        rows(f, "day", self.day_of_week.iter().map(|c| (weekday_label(c.category), c.photos)))?;

        if let Some(ref gps) = self.gps {
            heading(f, "Photo locations")?;
            if gps.photos.is_empty() {
                writeln!(f, "  No GPS data available in photos")?;
            } else {
                for row in &gps.photos {
                    writeln!(f, "  {:<32} {:>11.6} {:>11.6}", row.filename, row.latitude, row.longitude)?;
                }
                if let Some(center) = gps.center {
                    writeln!(f, "  Center: {:.6}, {:.6}", center.latitude, center.longitude)?;
                }
            }
        }

        heading(f, "Orientation")?;
        let o = &self.orientation;
        if o.is_empty() {
            writeln!(f, "  No orientation data available")?;
        } else {
            writeln!(f, "  Portrait   {:>6} ({:.1}%)", o.portrait, share(o.portrait, o.total()))?;
            writeln!(f, "  Landscape  {:>6} ({:.1}%)", o.landscape, share(o.landscape, o.total()))?;
        }

        heading(f, "Flash")?;
        let fl = &self.flash;
        if fl.is_empty() {
            writeln!(f, "  No flash data available")?;
        } else {
            writeln!(f, "  Flash used {:>6} ({:.1}%)", fl.used, share(fl.used, fl.total()))?;
            writeln!(f, "  No flash   {:>6} ({:.1}%)", fl.not_used, share(fl.not_used, fl.total()))?;
        }

        if s.date_range.is_some() || s.iso_stats.is_some() || s.aperture_stats.is_some() {
            heading(f, "Collection")?;
        }
        if let Some(range) = s.date_range {
            writeln!(
                f,
                "  Date range: {} days ({} to {})",
                range.span_days,
                range.earliest.format("%Y-%m-%d"),
                range.latest.format("%Y-%m-%d")
            )?;
        }
        if let Some(iso) = s.iso_stats {
            writeln!(f, "  ISO range:  {} - {} (average {:.0})", iso.min, iso.max, iso.mean)?;
        }
        if let Some(ap) = s.aperture_stats {
            writeln!(
                f,
                "  Aperture:   {} - {} (most used {})",
                aperture_label(ap.min),
                aperture_label(ap.max),
                aperture_label(ap.most_common)
            )?;
        }

        Ok(())
    }
}
