//! Atomic replacement of files on disk.
//!
//! Bytes are staged in a temp file next to the destination and renamed over
//! it, so readers see either the previous document or the new one.
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("stage temp file in {}", parent.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("write staged {}", dest.display()))?;
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("sync staged {}", dest.display()))?;
    if let Ok(existing) = fs::metadata(dest) {
        fs::set_permissions(staged.path(), existing.permissions())
            .with_context(|| format!("copy permissions of {}", dest.display()))?;
    }
    staged
        .persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    tracing::debug!(path = %dest.display(), bytes = bytes.len(), "published file");
    Ok(())
}
