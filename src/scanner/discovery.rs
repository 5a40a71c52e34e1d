use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image files under `directory` whose extension is in `extensions`.
/// Without `recursive` only the top level is listed.
pub fn discover_images(directory: &Path, extensions: &[String], recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(directory).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut images: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path, extensions))
        .collect();

    // Sort by path for consistent ordering
    images.sort();

    images
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| e.to_lowercase() == ext))
}
