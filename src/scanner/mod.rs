pub mod discovery;
pub mod metadata;

use rayon::prelude::*;
use std::path::Path;

use crate::config::ScannerConfig;
use crate::error::{Error, Result};
use crate::record::PhotoRecord;

pub use discovery::discover_images;
pub use metadata::{extract_metadata, ImageMetadata};

/// Turns a folder of images into metadata records.
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Scan `path` for images and read their metadata.
    ///
    /// Files that cannot be read or carry no EXIF block are skipped. Each
    /// record's filename is its path relative to `path`, so names stay unique
    /// in recursive scans.
    pub fn scan(&self, path: &Path, recursive: bool) -> Result<Vec<PhotoRecord>> {
        std::fs::metadata(path).map_err(|source| Error::ScanRoot {
            path: path.to_path_buf(),
            source,
        })?;

        let image_paths = discover_images(path, &self.config.image_extensions, recursive);
        tracing::info!(
            root = %path.display(),
            recursive,
            files = image_paths.len(),
            "Scanning images"
        );

        let records: Vec<PhotoRecord> = image_paths
            .par_iter()
            .filter_map(|file| self.scan_single_file(path, file))
            .collect();

        tracing::info!(
            found = image_paths.len(),
            with_metadata = records.len(),
            "Scan completed"
        );
        Ok(records)
    }

    fn scan_single_file(&self, root: &Path, file: &Path) -> Option<PhotoRecord> {
        let metadata = match extract_metadata(file) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to read image");
                return None;
            }
        };

        let filename = file
            .strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .unwrap_or(file)
            .to_string_lossy()
            .to_string();

        let record = metadata.into_record(filename);
        if record.is_none() {
            tracing::debug!(path = %file.display(), "Skipping image without EXIF data");
        }
        record
    }
}
