use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Portrait or landscape, decided from pixel dimensions at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Square images count as landscape.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Metadata for a single photo.
///
/// Every field but the filename may be missing from a given file. Missing
/// values stay `None` and are left out of every aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub filename: String,
    pub camera_model: Option<String>,
    pub lens_model: Option<String>,
    pub iso: Option<u32>,
    /// f-number
    pub aperture: Option<f64>,
    /// Millimetres
    pub focal_length: Option<f64>,
    /// Seconds
    pub exposure_time: Option<f64>,
    /// Capture time as recorded by the camera (local wall clock).
    pub timestamp: Option<NaiveDateTime>,
    pub gps: Option<GpsCoordinate>,
    pub orientation: Option<Orientation>,
    pub flash_fired: Option<bool>,
}

impl PhotoRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Set the location only when both halves of the pair are known.
    pub fn with_location(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.gps = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(GpsCoordinate { latitude, longitude }),
            _ => None,
        };
        self
    }

    pub fn latitude(&self) -> Option<f64> {
        self.gps.map(|g| g.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.gps.map(|g| g.longitude)
    }

    /// True when no metadata field at all is populated.
    pub fn is_bare(&self) -> bool {
        self.camera_model.is_none()
            && self.lens_model.is_none()
            && self.iso.is_none()
            && self.aperture.is_none()
            && self.focal_length.is_none()
            && self.exposure_time.is_none()
            && self.timestamp.is_none()
            && self.gps.is_none()
            && self.orientation.is_none()
            && self.flash_fired.is_none()
    }
}
