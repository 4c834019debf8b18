//! Parse response header lines collected during a transfer.

/// Headers of the final response that matter for saving the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub content_length: Option<u64>,
}

/// Parse collected header lines. With redirects (or `100 Continue`) libcurl
/// reports several header blocks; each status line starts a fresh block so
/// only the last response's headers survive.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut out = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            out = ResponseHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-disposition") {
                out.content_disposition = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                out.content_length = value.parse::<u64>().ok();
            }
        }
    }

    out
}
