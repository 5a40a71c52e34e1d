//! EXIF metadata aggregation for photo collections.
//!
//! The [`scanner`] turns a folder of images into [`PhotoRecord`]s and the
//! [`analysis::Analyzer`] answers distribution and summary questions over
//! them. [`report`] renders the results for the command line.

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod report;
pub mod scanner;

pub use analysis::{Analyzer, Granularity};
pub use error::{Error, Result};
pub use record::{GpsCoordinate, Orientation, PhotoRecord};
pub use scanner::Scanner;
