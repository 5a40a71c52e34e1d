use anyhow::Result;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::record::{Orientation, PhotoRecord};

/// Raw values read from one image file.
#[derive(Debug, Clone, Default)]
pub struct ImageMetadata {
    /// Whether the file carried an EXIF block at all.
    pub has_exif: bool,

    // Image dimensions, as stored (before EXIF rotation)
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// EXIF orientation tag (1-8)
    pub exif_orientation: Option<u32>,

    // Camera info
    pub camera_model: Option<String>,
    pub lens_model: Option<String>,

    // Exposure settings
    pub focal_length: Option<f64>,
    pub aperture: Option<f64>,
    pub exposure_time: Option<f64>,
    pub iso: Option<u32>,
    pub flash_fired: Option<bool>,

    // Date/time
    pub taken_at: Option<NaiveDateTime>,

    // GPS
    pub gps_latitude: Option<f64>,
    pub gps_longitude: Option<f64>,
}

impl ImageMetadata {
    /// Dimensions as displayed, with 90 degree EXIF rotations applied.
    pub fn display_dimensions(&self) -> Option<(u32, u32)> {
        let (w, h) = (self.width?, self.height?);
        match self.exif_orientation {
            Some(5..=8) => Some((h, w)),
            _ => Some((w, h)),
        }
    }

    /// Files without any EXIF block are dropped from the collection.
    pub fn into_record(self, filename: String) -> Option<PhotoRecord> {
        if !self.has_exif {
            return None;
        }

        let orientation = self
            .display_dimensions()
            .map(|(w, h)| Orientation::from_dimensions(w, h));

        let mut record = PhotoRecord::new(filename)
            .with_location(self.gps_latitude, self.gps_longitude);
        record.camera_model = self.camera_model;
        record.lens_model = self.lens_model;
        record.iso = self.iso.filter(|&v| v > 0);
        record.aperture = self.aperture.filter(|&v| v > 0.0);
        record.focal_length = self.focal_length.filter(|&v| v > 0.0);
        record.exposure_time = self.exposure_time.filter(|&v| v > 0.0);
        record.timestamp = self.taken_at;
        record.orientation = orientation;
        record.flash_fired = self.flash_fired;
        Some(record)
    }
}

pub fn extract_metadata(path: &Path) -> Result<ImageMetadata> {
    let mut metadata = ImageMetadata::default();

    // Header probe only; no pixel decoding
    if let Ok(reader) = image::ImageReader::open(path) {
        if let Ok(dims) = reader.into_dimensions() {
            metadata.width = Some(dims.0);
            metadata.height = Some(dims.1);
        }
    }

    let file = File::open(path)?;
    let mut bufreader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => exif,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No EXIF data");
            return Ok(metadata);
        }
    };
    metadata.has_exif = true;

    metadata.camera_model = ascii_field(&exif, exif::Tag::Model);
    metadata.lens_model = ascii_field(&exif, exif::Tag::LensModel);

    metadata.focal_length = rational_field(&exif, exif::Tag::FocalLength);
    metadata.aperture = rational_field(&exif, exif::Tag::FNumber);
    metadata.exposure_time = rational_field(&exif, exif::Tag::ExposureTime);
    metadata.iso = uint_field(&exif, exif::Tag::PhotographicSensitivity);

    metadata.flash_fired = uint_field(&exif, exif::Tag::Flash).map(flash_fired);

    metadata.exif_orientation = uint_field(&exif, exif::Tag::Orientation);
    if metadata.width.is_none() || metadata.height.is_none() {
        metadata.width = uint_field(&exif, exif::Tag::PixelXDimension);
        metadata.height = uint_field(&exif, exif::Tag::PixelYDimension);
    }

    metadata.taken_at = datetime_field(&exif, exif::Tag::DateTimeOriginal)
        .or_else(|| datetime_field(&exif, exif::Tag::DateTime));

    // Only keep the location when both halves decode
    let latitude = gps_field(&exif, exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef, 'S');
    let longitude = gps_field(&exif, exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef, 'W');
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        metadata.gps_latitude = Some(lat);
        metadata.gps_longitude = Some(lon);
    }

    Ok(metadata)
}

fn ascii_field(exif: &exif::Exif, tag: exif::Tag) -> Option<String> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    let value = field.display_value().to_string();
    let value = value.trim_matches('"').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn rational_field(exif: &exif::Exif, tag: exif::Tag) -> Option<f64> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match field.value {
        exif::Value::Rational(ref v) => v.first().map(|r| r.to_f64()).filter(|f| f.is_finite()),
        _ => None,
    }
}

fn gps_field(exif: &exif::Exif, tag: exif::Tag, ref_tag: exif::Tag, negative: char) -> Option<f64> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    let reference = exif.get_field(ref_tag, exif::In::PRIMARY)?;
    let dms: Vec<f64> = match field.value {
        exif::Value::Rational(ref v) => v.iter().map(|r| r.to_f64()).collect(),
        _ => return None,
    };
    signed_degrees(&dms, &reference.display_value().to_string(), negative)
}

/// Degrees/minutes/seconds to decimal degrees, negated when the reference
/// names the southern or western hemisphere.
pub(crate) fn signed_degrees(dms: &[f64], reference: &str, negative: char) -> Option<f64> {
    let [degrees, minutes, seconds] = dms.get(..3)? else {
        return None;
    };
    let value = dms_to_decimal(*degrees, *minutes, *seconds);
    if !value.is_finite() {
        return None;
    }
    Some(if reference.contains(negative) { -value } else { value })
}

/// Bit 0 of the EXIF Flash tag records whether it fired.
pub(crate) fn flash_fired(flash: u32) -> bool {
    flash & 1 == 1
}

fn uint_field(exif: &exif::Exif, tag: exif::Tag) -> Option<u32> {
    exif.get_field(tag, exif::In::PRIMARY)?.value.get_uint(0)
}

fn datetime_field(exif: &exif::Exif, tag: exif::Tag) -> Option<NaiveDateTime> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match field.value {
        exif::Value::Ascii(ref v) => {
            let raw = std::str::from_utf8(v.first()?).ok()?;
            parse_exif_datetime(raw)
        }
        _ => None,
    }
}

/// EXIF stores "YYYY:MM:DD HH:MM:SS"; some writers use dashes in the date.
pub(crate) fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim_matches(char::from(0)).trim();
    NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}
