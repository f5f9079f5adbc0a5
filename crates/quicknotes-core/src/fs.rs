//! Filesystem utilities for atomic writes.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub async fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination).await {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination).await;
        if let Err(retry_err) = fs::rename(temp_path, destination).await {
            let _ = fs::remove_file(temp_path).await;
            return Err(io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            ));
        }
    }
    Ok(())
}

/// Write `contents` to `destination` through a sibling temp file.
///
/// Readers see either the old file or the complete new one. Each call gets
/// its own temp file, so a write abandoned mid-flight cannot be renamed into
/// place by a later one.
pub async fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let temp_path = temp_path_for(destination);
    if let Err(err) = fs::write(&temp_path, contents).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(err);
    }
    rename_with_fallback(&temp_path, destination).await
}

fn temp_path_for(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    destination.with_file_name(name)
}
