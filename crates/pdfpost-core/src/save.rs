//! Writing a response body to its final location.
//!
//! The body goes to `<final>.part` first, is synced, then renamed into place,
//! so a partially written result never appears under the final name.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::filename;

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Where a result should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Exactly this path; an existing file is an error unless `overwrite`.
    Exact { path: PathBuf, overwrite: bool },
    /// `name` inside `dir`; an existing file gets a numbered sibling unless `overwrite`.
    InDir {
        dir: PathBuf,
        name: String,
        overwrite: bool,
    },
}

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

impl Destination {
    /// Decide the final path without writing anything.
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            Destination::Exact { path, overwrite } => {
                if path.exists() && !overwrite {
                    anyhow::bail!(
                        "output file already exists: {} (use --overwrite to replace)",
                        path.display()
                    );
                }
                Ok(path.clone())
            }
            Destination::InDir {
                dir,
                name,
                overwrite,
            } => {
                if *overwrite {
                    return Ok(dir.join(name));
                }
                filename::unique_path(dir, name).with_context(|| {
                    format!("no free file name for {} in {}", name, dir.display())
                })
            }
        }
    }
}

/// Write `body` to `dest` and return the final path.
pub fn save_body(body: &[u8], dest: &Destination) -> Result<PathBuf> {
    let final_path = dest.resolve()?;
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    let tmp = temp_path(&final_path);
    let written = write_synced(&tmp, body).and_then(|()| {
        fs::rename(&tmp, &final_path).with_context(|| {
            format!("rename {} -> {}", tmp.display(), final_path.display())
        })
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    tracing::info!(path = %final_path.display(), bytes = body.len(), "result saved");
    Ok(final_path)
}

fn write_synced(path: &Path, body: &[u8]) -> Result<()> {
    let mut f = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    f.write_all(body)
        .with_context(|| format!("write {}", path.display()))?;
    f.sync_all().context("sync saved file")?;
    Ok(())
}
