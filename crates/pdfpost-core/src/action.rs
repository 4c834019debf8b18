//! The four service actions and their fixed per-action parameters.

use serde::Serialize;
use std::fmt;

use crate::selection::FileKind;

/// How many files an action takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one file.
    Single,
    /// At least `min` files.
    AtLeast(usize),
}

/// A user-facing operation performed by the remote PDF service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Compress,
    ImageToPdf,
    Merge,
    Split,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Compress,
        Action::ImageToPdf,
        Action::Merge,
        Action::Split,
    ];

    /// Endpoint path relative to the service base URL.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Action::Compress => "compress",
            Action::ImageToPdf => "image-to-pdf",
            Action::Merge => "merge",
            Action::Split => "split",
        }
    }

    /// Multipart field name the service reads the upload(s) from.
    pub fn file_field(self) -> &'static str {
        match self {
            Action::Merge => "files",
            _ => "file",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Action::Merge => Arity::AtLeast(2),
            _ => Arity::Single,
        }
    }

    /// Kind of file the action accepts.
    pub fn accepts(self) -> FileKind {
        match self {
            Action::ImageToPdf => FileKind::Image,
            _ => FileKind::Pdf,
        }
    }

    /// Name the result is saved under when nothing else is chosen.
    pub fn default_download_name(self) -> &'static str {
        match self {
            Action::Compress => "compressed.pdf",
            Action::ImageToPdf => "converted.pdf",
            Action::Merge => "merged.pdf",
            Action::Split => "split.pdf",
        }
    }

    /// Prefix for `"<label> failed: <status> - <text>"`.
    pub fn failure_label(self) -> &'static str {
        match self {
            Action::Compress => "Compression",
            Action::ImageToPdf => "Image-to-PDF",
            Action::Merge => "Merge",
            Action::Split => "Split",
        }
    }

    /// Noun used in `"Received an empty file. <noun> may have failed."`.
    pub fn empty_result_noun(self) -> &'static str {
        match self {
            Action::Compress => "Compression",
            Action::ImageToPdf => "Conversion",
            Action::Merge => "Merge",
            Action::Split => "Split",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Compress => "compress",
            Action::ImageToPdf => "image-to-pdf",
            Action::Merge => "merge",
            Action::Split => "split",
        };
        f.write_str(s)
    }
}
