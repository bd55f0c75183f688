use crate::error::{Result, TagsError};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("tags"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `contents`. The bytes go to a sibling temp file
/// first and are renamed into place, so a failed run never leaves a
/// truncated tags file behind.
pub fn write_tag_file(path: &Path, contents: &[u8]) -> Result<()> {
    let unwritable = |source: std::io::Error| TagsError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(unwritable)?;
    }

    let temp_path = temp_path_for(path);
    let written = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = written {
        if temp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), "failed to remove temp file: {}", cleanup);
            }
        }
        return Err(unwritable(e));
    }

    info!(path = %path.display(), bytes = contents.len(), "wrote tags file");
    Ok(())
}
