use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::domain::face_detector::FaceDetector;
use crate::extraction::cropper::{artifact_filename, crop_face};
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::ingest::hasher::{hash_rename, CollisionPolicy};
use crate::ingest::locator::locate_images;
use crate::pipeline::run_logger::{measure, RunLogger};

/// Terminal classification of one routed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// At least one face extracted; source moved to `processed`.
    HasFaces,
    /// No faces; source moved to `no_faces`.
    NoFaces,
}

/// Whether a per-item error aborts the batch or is captured and reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort on the first per-item error, leaving the run mid-state.
    FailFast,
    /// Capture the error, leave the item in the input directory, continue.
    KeepGoing,
}

/// The three destination directories of a run. The input directory is
/// never created or owned by the pipeline.
#[derive(Clone, Debug)]
pub struct RunDirs {
    pub output: PathBuf,
    pub processed: PathBuf,
    pub no_faces: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ItemFailure {
    pub base_name: String,
    pub reason: String,
}

/// End-of-run accounting. `no_faces` holds base names, sorted for a
/// deterministic report regardless of directory enumeration order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub faces_extracted: usize,
    pub with_faces: usize,
    pub no_faces: Vec<String>,
    pub failures: Vec<ItemFailure>,
}

/// Batch driver: scan → hash-rename (directory inputs) → re-scan →
/// route every item → report.
///
/// Each item ends in exactly one terminal directory; relocation is a
/// rename, never a copy. There is no checkpointing between items:
/// re-running after a crash is safe because hashing is idempotent and
/// already-routed items are gone from the input at re-scan time.
pub struct BatchExtractUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    logger: Box<dyn RunLogger>,
    collision_policy: CollisionPolicy,
    error_policy: ErrorPolicy,
    faces_written: usize,
}

impl BatchExtractUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        logger: Box<dyn RunLogger>,
        collision_policy: CollisionPolicy,
        error_policy: ErrorPolicy,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            logger,
            collision_policy,
            error_policy,
            faces_written: 0,
        }
    }

    pub fn execute(
        &mut self,
        input: &Path,
        dirs: &RunDirs,
    ) -> Result<RunReport, Box<dyn std::error::Error>> {
        let mut report = RunReport::default();
        self.faces_written = 0;

        let mut paths = measure(self.logger.as_mut(), "scan", || locate_images(input))?;
        if paths.is_empty() {
            self.logger.info("no valid images found");
            return Ok(report);
        }
        self.logger
            .info(&format!("{} images to process...", paths.len()));

        if input.is_dir() {
            // Canonicalize filenames by content hash, then re-scan so the
            // loop sees the renamed paths.
            let policy = self.collision_policy;
            measure(self.logger.as_mut(), "hash", || {
                hash_rename(&paths, input, policy)
            })?;
            paths = measure(self.logger.as_mut(), "scan", || locate_images(input))?;
        }

        for path in &paths {
            let base_name = base_name_of(path);
            match self.route_item(path, dirs, &base_name) {
                Ok(ItemOutcome::HasFaces) => report.with_faces += 1,
                Ok(ItemOutcome::NoFaces) => report.no_faces.push(base_name),
                Err(e) => match self.error_policy {
                    ErrorPolicy::FailFast => return Err(e),
                    ErrorPolicy::KeepGoing => {
                        log::warn!("skipping {base_name}: {e}");
                        report.failures.push(ItemFailure {
                            base_name,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }
        report.faces_extracted = self.faces_written;

        report.no_faces.sort();
        if !report.no_faces.is_empty() {
            self.logger
                .info("No faces were detected in the following images:");
            for name in &report.no_faces {
                self.logger.info(name);
            }
        }
        if !report.failures.is_empty() {
            self.logger.info("The following images failed to process:");
            for failure in &report.failures {
                self.logger
                    .info(&format!("{}: {}", failure.base_name, failure.reason));
            }
        }

        self.logger.summary();
        Ok(report)
    }

    /// Routes one item to its terminal directory.
    ///
    /// Decode → detect → either move to `no_faces`, or write every face
    /// crop in detector order (1-based) and move to `processed`.
    fn route_item(
        &mut self,
        path: &Path,
        dirs: &RunDirs,
        base_name: &str,
    ) -> Result<ItemOutcome, Box<dyn std::error::Error>> {
        let frame = measure(self.logger.as_mut(), "decode", || self.reader.read(path))?;
        let faces = measure(self.logger.as_mut(), "detect", || {
            self.detector.detect(&frame)
        })?;

        if faces.is_empty() {
            measure(self.logger.as_mut(), "move", || {
                move_file(&dirs.no_faces, path)
            })?;
            return Ok(ItemOutcome::NoFaces);
        }

        for (i, face) in faces.iter().enumerate() {
            let crop = measure(self.logger.as_mut(), "crop", || crop_face(&frame, face))?;
            let dest = dirs.output.join(artifact_filename(base_name, i + 1, face));
            measure(self.logger.as_mut(), "write", || {
                self.writer.write(&dest, &crop)
            })?;
            self.faces_written += 1;
        }

        measure(self.logger.as_mut(), "move", || {
            move_file(&dirs.processed, path)
        })?;
        Ok(ItemOutcome::HasFaces)
    }
}

fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Relocate a source image into a terminal directory, keeping its name.
fn move_file(folder: &Path, path: &Path) -> std::io::Result<()> {
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("path has no file name: {}", path.display()),
        )
    })?;
    fs::rename(path, folder.join(name))
}
