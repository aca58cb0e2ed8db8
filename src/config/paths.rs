//! Remote directory resolution
//!
//! Hosts without an explicit directory get one generated under
//! `general.remote_root`, either mirroring the workspace's path relative to
//! the home directory or derived from a hash of its absolute path.

use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

use remote_settings::{GeneralSettings, HostEntry};

use super::resolved::ResolvedHost;

/// Number of hex characters kept from the path digest.
const HASH_LEN: usize = 32;

/// Stable hash of a workspace path.
///
/// Computed over the canonical absolute path so the same directory always
/// maps to the same value, across runs and regardless of how it was named.
pub fn hash_path(path: &Path) -> String {
    let canonical = canonical_path(path);

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let digest = hex::encode(hasher.finalize());

    digest[..HASH_LEN].to_string()
}

/// Remote directory for a workspace host that does not set one.
///
/// `anchor` is the directory relative remote paths are computed from,
/// normally the user's home.
pub fn generated_directory(general: &GeneralSettings, root: &Path, anchor: &Path) -> PathBuf {
    let suffix = if general.use_relative_remote_paths {
        match relative_to(root, anchor) {
            Some(relative) => relative,
            None => {
                warn!(
                    root = %root.display(),
                    anchor = %anchor.display(),
                    "workspace is outside the relative path anchor, using hashed remote directory"
                );
                PathBuf::from(hashed_name(root))
            }
        }
    } else {
        PathBuf::from(hashed_name(root))
    };

    let remote_root = PathBuf::from(&general.remote_root);
    if suffix.as_os_str().is_empty() {
        // Workspace is the anchor itself
        return remote_root;
    }
    remote_root.join(suffix)
}

/// Give every host a concrete directory, keeping explicit ones as-is.
pub fn resolve_directories(
    hosts: Vec<HostEntry>,
    general: &GeneralSettings,
    root: &Path,
    anchor: &Path,
) -> Vec<ResolvedHost> {
    let mut generated: Option<PathBuf> = None;

    hosts
        .into_iter()
        .map(|mut entry| {
            let directory = match entry.directory.take() {
                Some(directory) => directory,
                None => generated
                    .get_or_insert_with(|| generated_directory(general, root, anchor))
                    .clone(),
            };
            ResolvedHost::from_entry(entry, directory)
        })
        .collect()
}

fn hashed_name(root: &Path) -> String {
    let name = absolute_path(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());

    format!("{}_{}", name, hash_path(root))
}

fn relative_to(root: &Path, anchor: &Path) -> Option<PathBuf> {
    if let Ok(relative) = absolute_path(root).strip_prefix(absolute_path(anchor)) {
        return Some(relative.to_path_buf());
    }

    // Symlinked homes and temp dirs only line up after canonicalization
    canonical_path(root)
        .strip_prefix(canonical_path(anchor))
        .ok()
        .map(Path::to_path_buf)
}

fn canonical_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| absolute_path(path))
}

/// Lexically absolute form of `path`, with `.` and `..` folded away.
///
/// Symlinks are left alone, so the result names the path the way the
/// caller did.
pub(crate) fn absolute_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => return path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
