//! Selection errors, worded the way the user sees them.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::FileKind;
use crate::action::Action;

/// Why a selection of files cannot be submitted.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Please select {0}.")]
    NothingSelected(FileKind),

    #[error("{action} takes a single file, got {got}")]
    TooMany { action: Action, got: usize },

    #[error("{action} needs at least {min} files, got {got}")]
    TooFew {
        action: Action,
        min: usize,
        got: usize,
    },

    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("File \"{name}\" is too large. Max allowed size is {limit}.")]
    TooLarge { name: String, limit: SizeLimit },

    #[error("File \"{0}\" is empty.")]
    EmptyFile(String),

    #[error("File \"{name}\" is not {expected}.")]
    WrongKind { name: String, expected: FileKind },

    #[error("invalid page range {start}-{end}: pages start at 1 and end must not precede start")]
    InvalidRange { start: u32, end: u32 },
}

/// Per-file upload limit; displays as whole megabytes when it is a whole number of MiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit(pub u64);

impl fmt::Display for SizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MIB: u64 = 1024 * 1024;
        if self.0 >= MIB && self.0 % MIB == 0 {
            write!(f, "{}MB", self.0 / MIB)
        } else {
            write!(f, "{} bytes", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_matches_upload_form() {
        let e = SelectionError::TooLarge {
            name: "scan.pdf".to_string(),
            limit: SizeLimit(5 * 1024 * 1024),
        };
        assert_eq!(
            e.to_string(),
            "File \"scan.pdf\" is too large. Max allowed size is 5MB."
        );
    }

    #[test]
    fn odd_limits_are_shown_in_bytes() {
        assert_eq!(SizeLimit(1500).to_string(), "1500 bytes");
        assert_eq!(SizeLimit(2 * 1024 * 1024).to_string(), "2MB");
    }

    #[test]
    fn nothing_selected_names_the_kind() {
        assert_eq!(
            SelectionError::NothingSelected(FileKind::Pdf).to_string(),
            "Please select a PDF file."
        );
        assert_eq!(
            SelectionError::NothingSelected(FileKind::Image).to_string(),
            "Please select an image file."
        );
    }
}
