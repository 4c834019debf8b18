//! File type detection: extension first, confirmed by leading magic bytes.

use std::fmt;
use std::path::Path;

/// Number of leading bytes read for sniffing.
pub const SNIFF_LEN: usize = 16;

/// Broad kind of upload an action accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
}

/// Displays with an indefinite article ("a PDF file", "an image file").
impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => f.write_str("a PDF file"),
            FileKind::Image => f.write_str("an image file"),
        }
    }
}

/// Concrete format of a selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
}

impl Format {
    pub fn kind(self) -> FileKind {
        match self {
            Format::Pdf => FileKind::Pdf,
            _ => FileKind::Image,
        }
    }

    /// MIME type sent with the multipart file part.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Pdf => "application/pdf",
            Format::Jpeg => "image/jpeg",
            Format::Png => "image/png",
            Format::Gif => "image/gif",
            Format::Bmp => "image/bmp",
            Format::Tiff => "image/tiff",
            Format::Webp => "image/webp",
        }
    }

    /// Format implied by the file extension (case-insensitive).
    pub fn from_extension(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let format = match ext.as_str() {
            "pdf" => Format::Pdf,
            "jpg" | "jpeg" | "jfif" => Format::Jpeg,
            "png" => Format::Png,
            "gif" => Format::Gif,
            "bmp" => Format::Bmp,
            "tif" | "tiff" => Format::Tiff,
            "webp" => Format::Webp,
            _ => return None,
        };
        Some(format)
    }

    /// Format recognised from the first bytes of the file.
    pub fn sniff(head: &[u8]) -> Option<Format> {
        if head.starts_with(b"%PDF-") {
            return Some(Format::Pdf);
        }
        if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Format::Jpeg);
        }
        if head.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Format::Png);
        }
        if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
            return Some(Format::Gif);
        }
        if head.starts_with(b"BM") {
            return Some(Format::Bmp);
        }
        if head.starts_with(b"II*\0") || head.starts_with(b"MM\0*") {
            return Some(Format::Tiff);
        }
        if head.len() >= 12 && &head[0..4] == b"RIFF" && &head[8..12] == b"WEBP" {
            return Some(Format::Webp);
        }
        None
    }
}

/// Resolve the format of a file from its name and leading bytes.
///
/// Both must agree on the kind (PDF vs image). For images the sniffed format
/// wins, so a PNG saved as `.jpg` is still sent as `image/png`.
pub fn detect(path: &Path, head: &[u8]) -> Option<Format> {
    let by_ext = Format::from_extension(path)?;
    let by_magic = Format::sniff(head)?;
    if by_ext.kind() != by_magic.kind() {
        return None;
    }
    Some(by_magic)
}
