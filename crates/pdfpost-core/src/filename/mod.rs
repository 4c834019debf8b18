//! Naming of saved results.
//!
//! The default name is fixed per action; the service's Content-Disposition
//! name can be preferred instead. Existing files are not replaced: like a
//! browser's downloads folder, `merged.pdf` becomes `merged (1).pdf`.

mod content_disposition;
mod sanitize;

pub use content_disposition::disposition_filename;
pub use sanitize::sanitize_filename;

use std::path::{Path, PathBuf};

use crate::action::Action;

/// Highest `(n)` suffix tried before giving up on a free name.
const MAX_SUFFIX: u32 = 9999;

/// Name to save the result of `action` under.
///
/// With `prefer_server_name`, a usable filename from `content_disposition`
/// wins over the action's default.
pub fn download_name(
    action: Action,
    content_disposition: Option<&str>,
    prefer_server_name: bool,
) -> String {
    if prefer_server_name {
        if let Some(name) = content_disposition
            .and_then(disposition_filename)
            .map(|n| sanitize_filename(&n))
            .filter(|n| !n.is_empty())
        {
            return name;
        }
    }
    action.default_download_name().to_string()
}

/// `stem (n).ext` for `n`; names without an extension get the suffix at the end.
fn numbered(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
        _ => format!("{} ({})", name, n),
    }
}

/// First path in `dir` for `name` that does not exist yet.
pub fn unique_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let first = dir.join(name);
    if !first.exists() {
        return Some(first);
    }
    (1..=MAX_SUFFIX)
        .map(|n| dir.join(numbered(name, n)))
        .find(|p| !p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_unless_server_name_preferred() {
        let cd = Some("attachment; filename=\"4e1f_compressed.pdf\"");
        assert_eq!(download_name(Action::Compress, cd, false), "compressed.pdf");
        assert_eq!(
            download_name(Action::Compress, cd, true),
            "4e1f_compressed.pdf"
        );
    }

    #[test]
    fn unusable_server_name_falls_back() {
        assert_eq!(
            download_name(Action::Merge, Some("attachment; filename=\"..\""), true),
            "merged.pdf"
        );
        assert_eq!(download_name(Action::Split, None, true), "split.pdf");
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered("merged.pdf", 1), "merged (1).pdf");
        assert_eq!(numbered("archive.tar.gz", 2), "archive.tar (2).gz");
        assert_eq!(numbered("README", 3), "README (3)");
        assert_eq!(numbered(".hidden", 1), ".hidden (1)");
    }

    #[test]
    fn unique_path_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            unique_path(dir.path(), "split.pdf").unwrap(),
            dir.path().join("split.pdf")
        );
        std::fs::write(dir.path().join("split.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("split (1).pdf"), b"x").unwrap();
        assert_eq!(
            unique_path(dir.path(), "split.pdf").unwrap(),
            dir.path().join("split (2).pdf")
        );
    }
}
