use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::shared::constants::HASH_CHUNK_SIZE;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove duplicate {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content collision: {target} already exists")]
    Collision { target: PathBuf },
}

/// What to do when two inputs hash to the same canonical name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Replace the existing file (the two are byte-identical).
    Overwrite,
    /// Delete the duplicate source and keep the existing file.
    Skip,
    /// Abort the rename pass.
    Error,
}

/// SHA-256 fingerprint of a file's full content as lowercase hex.
///
/// Streams the file in fixed-size chunks; identical bytes always produce
/// the same digest, which makes the rename pass idempotent.
pub fn content_fingerprint(path: &Path) -> Result<String, HashError> {
    let mut file = File::open(path).map_err(|source| HashError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Renames each file to `<digest><original-extension>` inside `input_dir`.
///
/// Renames are same-directory moves, so they are atomic on POSIX
/// filesystems. Fail-fast: the first error aborts the pass and files
/// already renamed stay renamed.
pub fn hash_rename(
    paths: &[PathBuf],
    input_dir: &Path,
    policy: CollisionPolicy,
) -> Result<Vec<PathBuf>, HashError> {
    let mut renamed = Vec::with_capacity(paths.len());
    for path in paths {
        let digest = content_fingerprint(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let target = input_dir.join(format!("{digest}{extension}"));

        if target == *path {
            // Already canonically named; nothing to do.
            renamed.push(target);
            continue;
        }

        if target.exists() {
            match policy {
                CollisionPolicy::Overwrite => {
                    log::warn!("overwriting duplicate content: {}", target.display());
                }
                CollisionPolicy::Skip => {
                    log::info!("skipping duplicate content: {}", path.display());
                    fs::remove_file(path).map_err(|source| HashError::Remove {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    continue;
                }
                CollisionPolicy::Error => {
                    return Err(HashError::Collision { target });
                }
            }
        }

        fs::rename(path, &target).map_err(|source| HashError::Rename {
            from: path.to_path_buf(),
            to: target.clone(),
            source,
        })?;
        renamed.push(target);
    }
    Ok(renamed)
}
