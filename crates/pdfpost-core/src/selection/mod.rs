//! Selected files and their validation before upload.
//!
//! A selection is validated as a whole: the first oversized file rejects every
//! file in it, and nothing is sent until count, size and type all pass.

mod error;
mod kind;
mod range;

pub use error::{SelectionError, SizeLimit};
pub use kind::{detect, FileKind, Format, SNIFF_LEN};
pub use range::PageRange;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::action::{Action, Arity};

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Final path component, sent as the multipart filename.
    pub name: String,
    pub size: u64,
    /// Leading bytes used for type detection.
    head: Vec<u8>,
}

impl SelectedFile {
    /// Stat the file and read its leading bytes.
    pub fn inspect(path: &Path) -> Result<Self, SelectionError> {
        let unreadable = |source| SelectionError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(path).map_err(unreadable)?;
        if !meta.is_file() {
            return Err(SelectionError::NotAFile(path.to_path_buf()));
        }
        let mut head = Vec::with_capacity(SNIFF_LEN);
        File::open(path)
            .and_then(|f| f.take(SNIFF_LEN as u64).read_to_end(&mut head))
            .map_err(unreadable)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            head,
        })
    }

    /// Detected format, or None if name and content disagree or are unknown.
    pub fn format(&self) -> Option<Format> {
        detect(&self.path, &self.head)
    }
}

/// A validated set of files for one action.
#[derive(Debug, Clone)]
pub struct Selection {
    action: Action,
    files: Vec<(SelectedFile, Format)>,
}

impl Selection {
    /// Inspect and validate `paths` for `action`.
    ///
    /// Checks run in order: something selected, then each file in turn is
    /// inspected and size-checked (stopping at the first unreadable or
    /// oversized one), then the action's file count, then per-file emptiness
    /// and type.
    pub fn validate(
        action: Action,
        paths: &[PathBuf],
        max_file_bytes: u64,
    ) -> Result<Self, SelectionError> {
        if paths.is_empty() {
            return Err(SelectionError::NothingSelected(action.accepts()));
        }

        let mut inspected = Vec::with_capacity(paths.len());
        for path in paths {
            let f = SelectedFile::inspect(path)?;
            if f.size > max_file_bytes {
                tracing::debug!(file = %f.name, size = f.size, "selection rejected: too large");
                return Err(SelectionError::TooLarge {
                    name: f.name,
                    limit: SizeLimit(max_file_bytes),
                });
            }
            inspected.push(f);
        }

        match action.arity() {
            Arity::Single if inspected.len() > 1 => {
                return Err(SelectionError::TooMany {
                    action,
                    got: inspected.len(),
                });
            }
            Arity::AtLeast(min) if inspected.len() < min => {
                return Err(SelectionError::TooFew {
                    action,
                    min,
                    got: inspected.len(),
                });
            }
            _ => {}
        }

        let expected = action.accepts();
        let mut files = Vec::with_capacity(inspected.len());
        for f in inspected {
            if f.size == 0 {
                return Err(SelectionError::EmptyFile(f.name));
            }
            match f.format() {
                Some(format) if format.kind() == expected => files.push((f, format)),
                _ => {
                    return Err(SelectionError::WrongKind { name: f.name, expected });
                }
            }
        }

        Ok(Self { action, files })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Files with their detected formats, in selection order.
    pub fn files(&self) -> &[(SelectedFile, Format)] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(f, _)| f.size).sum()
    }

    /// Short human label for the selection, e.g. `report.pdf (1.2 MiB)`.
    pub fn label(&self) -> String {
        let size = human_size(self.total_bytes());
        match self.files.as_slice() {
            [(only, _)] => format!("{} ({})", only.name, size),
            many => {
                let names: Vec<&str> = many.iter().map(|(f, _)| f.name.as_str()).collect();
                format!("{} files: {} ({})", many.len(), names.join(", "), size)
            }
        }
    }
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    fn pdf_bytes(len: usize) -> Vec<u8> {
        let mut v = b"%PDF-1.4\n".to_vec();
        v.resize(len.max(v.len()), b'x');
        v
    }

    #[test]
    fn empty_selection_asks_for_a_file() {
        let err = Selection::validate(Action::Compress, &[], 1024).unwrap_err();
        assert_eq!(err.to_string(), "Please select a PDF file.");
        let err = Selection::validate(Action::ImageToPdf, &[], 1024).unwrap_err();
        assert_eq!(err.to_string(), "Please select an image file.");
    }

    #[test]
    fn single_pdf_passes() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(dir.path(), "doc.pdf", &pdf_bytes(100));
        let sel = Selection::validate(Action::Compress, &[p], 1024).unwrap();
        assert_eq!(sel.files().len(), 1);
        assert_eq!(sel.files()[0].0.name, "doc.pdf");
        assert_eq!(sel.files()[0].1, Format::Pdf);
        assert_eq!(sel.label(), "doc.pdf (100 B)");
    }

    #[test]
    fn first_oversized_file_rejects_whole_selection() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.pdf", &pdf_bytes(10));
        let b = write_file(dir.path(), "b.pdf", &pdf_bytes(2048));
        let c = write_file(dir.path(), "c.pdf", &pdf_bytes(4096));
        let err = Selection::validate(Action::Merge, &[a, b, c], 1024).unwrap_err();
        match err {
            SelectionError::TooLarge { name, limit } => {
                assert_eq!(name, "b.pdf");
                assert_eq!(limit, SizeLimit(1024));
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn oversized_file_reported_before_later_missing_one() {
        let dir = tempfile::tempdir().unwrap();
        let big = write_file(dir.path(), "big.pdf", &pdf_bytes(4096));
        let missing = dir.path().join("missing.pdf");
        let err = Selection::validate(Action::Merge, &[big, missing.clone()], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::TooLarge { ref name, .. } if name == "big.pdf"));

        let small = write_file(dir.path(), "small.pdf", &pdf_bytes(10));
        let err = Selection::validate(Action::Merge, &[small, missing], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::Unreadable { .. }));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(dir.path(), "edge.pdf", &pdf_bytes(1024));
        assert!(Selection::validate(Action::Split, &[p], 1024).is_ok());
    }

    #[test]
    fn merge_needs_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.pdf", &pdf_bytes(10));
        let err = Selection::validate(Action::Merge, &[a], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::TooFew { min: 2, got: 1, .. }));
    }

    #[test]
    fn single_file_actions_reject_many() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.pdf", &pdf_bytes(10));
        let b = write_file(dir.path(), "b.pdf", &pdf_bytes(10));
        let err = Selection::validate(Action::Compress, &[a, b], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::TooMany { got: 2, .. }));
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let jpg = write_file(dir.path(), "photo.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 1, 2]);
        let err = Selection::validate(Action::Compress, &[jpg.clone()], 1024).unwrap_err();
        assert_eq!(err.to_string(), "File \"photo.jpg\" is not a PDF file.");

        let sel = Selection::validate(Action::ImageToPdf, &[jpg], 1024).unwrap();
        assert_eq!(sel.files()[0].1, Format::Jpeg);
    }

    #[test]
    fn text_file_with_pdf_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write_file(dir.path(), "fake.pdf", b"just some text");
        let err = Selection::validate(Action::Split, &[p], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::WrongKind { .. }));
    }

    #[test]
    fn empty_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_file(dir.path(), "empty.pdf", b"");
        let err = Selection::validate(Action::Compress, &[empty], 1024).unwrap_err();
        assert_eq!(err.to_string(), "File \"empty.pdf\" is empty.");

        let missing = dir.path().join("missing.pdf");
        let err = Selection::validate(Action::Compress, &[missing], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::Unreadable { .. }));

        let err =
            Selection::validate(Action::Compress, &[dir.path().to_path_buf()], 1024).unwrap_err();
        assert!(matches!(err, SelectionError::NotAFile(_)));
    }

    #[test]
    fn label_for_many_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "a.pdf", &pdf_bytes(1024));
        let b = write_file(dir.path(), "b.pdf", &pdf_bytes(1024));
        let sel = Selection::validate(Action::Merge, &[a, b], 4096).unwrap();
        assert_eq!(sel.label(), "2 files: a.pdf, b.pdf (2.0 KiB)");
        assert_eq!(sel.total_bytes(), 2048);
    }
}
