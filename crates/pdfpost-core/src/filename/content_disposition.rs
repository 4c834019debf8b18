//! Content-Disposition filename extraction (`filename` and RFC 5987 `filename*`).

/// Filename carried by a Content-Disposition value, if any.
///
/// `filename*=UTF-8''...` wins over a plain `filename=` when both are present.
pub fn disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in split_params(header_value).into_iter().map(str::trim) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let raw = raw.trim();

        if key == "filename*" {
            let lower = raw.to_ascii_lowercase();
            if lower.starts_with("utf-8''") {
                let decoded = percent_decode(&raw["utf-8''".len()..]);
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
        } else if key == "filename" {
            let value = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
                Some(inner) => unescape_quoted(inner),
                None => raw.to_string(),
            };
            if !value.is_empty() {
                plain = Some(value);
            }
        }
    }

    plain
}

/// Split on `;` outside quoted-strings, honouring backslash escapes.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// Undo backslash escaping inside a quoted-string.
fn unescape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Percent-decode, keeping malformed escapes verbatim. Invalid UTF-8 is replaced.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_and_token() {
        assert_eq!(
            disposition_filename("attachment; filename=\"9f2c_merged.pdf\"").as_deref(),
            Some("9f2c_merged.pdf")
        );
        assert_eq!(
            disposition_filename("attachment; filename=out.pdf").as_deref(),
            Some("out.pdf")
        );
    }

    #[test]
    fn escaped_quote_inside_value() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="a \"b\".pdf""#).as_deref(),
            Some("a \"b\".pdf")
        );
    }

    #[test]
    fn semicolon_inside_quotes() {
        assert_eq!(
            disposition_filename("attachment; filename=\"a;b.pdf\"; size=10").as_deref(),
            Some("a;b.pdf")
        );
        assert_eq!(
            disposition_filename(r#"attachment; filename="x\";y.pdf""#).as_deref(),
            Some("x\";y.pdf")
        );
    }

    #[test]
    fn extended_value_wins() {
        assert_eq!(
            disposition_filename(
                "attachment; filename=\"fallback.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
            )
            .as_deref(),
            Some("résumé.pdf")
        );
    }

    #[test]
    fn malformed_escape_kept() {
        assert_eq!(
            disposition_filename("attachment; filename*=utf-8''100%25%zz.pdf").as_deref(),
            Some("100%%zz.pdf")
        );
    }

    #[test]
    fn inline_without_filename() {
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename("attachment; filename=\"\""), None);
    }
}
