use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;

/// Resolves an input path into candidate image paths.
///
/// - Directory: every directly-contained file whose lowercased extension
///   is on the allow-list, in native enumeration order (not stable across
///   filesystems; callers must not depend on it). No recursion.
/// - Single matching file: a one-element list.
/// - Anything else: an empty list, treated as "nothing to do".
pub fn locate_images(input: &Path) -> io::Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut paths = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        Ok(paths)
    } else if input.is_file() && has_image_extension(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        Ok(Vec::new())
    }
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
