//! Make a service-supplied filename safe to create in the output directory.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest sanitized name. Leaves room for a ` (9999)` numbering suffix and
/// the `.part` temp suffix within NAME_MAX.
pub const MAX_NAME_BYTES: usize = NAME_MAX - " (9999)".len() - ".part".len();

/// Extensions longer than this are treated as part of the stem when truncating.
const MAX_EXT_BYTES: usize = 16;

/// Replace separators, NUL and control characters with `_`, collapse runs of
/// `_`, trim surrounding dots/spaces/underscores and cap the length at
/// [`MAX_NAME_BYTES`] on a char boundary, keeping a short extension.
/// May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c == '/' || c == '\\' || c == '\0' || c.is_control() {
            '_'
        } else {
            c
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = trim_edges(&out);
    if trimmed.len() <= MAX_NAME_BYTES {
        return trimmed.to_string();
    }

    let (stem, ext) = match trimmed.rfind('.') {
        Some(dot) if dot > 0 && trimmed.len() - dot <= MAX_EXT_BYTES => {
            (&trimmed[..dot], &trimmed[dot..])
        }
        _ => (trimmed, ""),
    };
    let stem = trim_edges(truncate(stem, MAX_NAME_BYTES - ext.len()));
    if stem.is_empty() {
        return String::new();
    }
    format!("{}{}", stem, ext)
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '.' || c == '_')
}

fn truncate(s: &str, max: usize) -> &str {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
