//! HTTP client for the remote PDF service.
//!
//! Uses the curl crate (libcurl) to POST a multipart form and collect the
//! response body in memory. One attempt per request; failures are reported,
//! not retried.

mod error;
mod headers;

pub use error::ServiceError;
pub use headers::ResponseHeaders;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;
use url::Url;

use crate::action::Action;
use crate::config::PdfpostConfig;
use crate::form::Submission;
use crate::progress::TransferProgress;

/// Response of a successful (2xx, non-empty) request.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    pub status: u32,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

/// Join an endpoint path onto the service base URL.
///
/// Slashes between the two are normalised, so `http://h/api` + `/merge` and
/// `http://h/api/` + `merge` both give `http://h/api/merge`.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ServiceError> {
    let invalid = |reason: String| ServiceError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme {}", base.scheme())));
    }
    if base.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| invalid(e.to_string()))
}

/// Check status and body of a finished transfer for `action`.
pub fn check_response(
    action: Action,
    status: u32,
    headers: ResponseHeaders,
    body: Vec<u8>,
) -> Result<ServiceResponse, ServiceError> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(&body).trim().to_string();
        return Err(ServiceError::Rejected {
            label: action.failure_label(),
            status,
            body: text,
        });
    }
    if body.is_empty() {
        return Err(ServiceError::Empty {
            noun: action.empty_result_noun(),
        });
    }
    Ok(ServiceResponse {
        status,
        headers,
        body,
    })
}

/// Client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ServiceClient {
    pub fn new(base_url: &str, connect_timeout: Duration, request_timeout: Duration) -> Self {
        Self {
            base_url: base_url.to_string(),
            connect_timeout,
            request_timeout,
        }
    }

    pub fn from_config(cfg: &PdfpostConfig) -> Self {
        Self::new(
            &cfg.base_url,
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `submission` to `endpoint` and return the checked response.
    ///
    /// `on_progress` is called from the libcurl progress callback; returning
    /// false cancels the transfer. Runs in the current thread; call from
    /// `spawn_blocking` if used from async code.
    pub fn submit(
        &self,
        endpoint: &Url,
        submission: &Submission,
        on_progress: Option<&mut dyn FnMut(TransferProgress) -> bool>,
    ) -> Result<ServiceResponse> {
        let action = submission.action();
        let form = submission.to_curl_form()?;

        let mut easy = curl::easy::Easy::new();
        easy.url(endpoint.as_str()).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.request_timeout)?;
        easy.useragent(&format!("pdfpost/{}", env!("CARGO_PKG_VERSION")))?;

        // An empty "Expect:" stops libcurl waiting for 100-continue on large forms.
        let mut list = curl::easy::List::new();
        list.append("Expect:")?;
        easy.http_headers(list)?;
        easy.httppost(form)?;
        easy.progress(on_progress.is_some())?;

        tracing::info!(%action, url = %endpoint, "submitting");

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            if let Some(cb) = on_progress {
                transfer.progress_function(move |dltotal, dlnow, ultotal, ulnow| {
                    cb(TransferProgress::from_curl(dltotal, dlnow, ultotal, ulnow))
                })?;
            }
            transfer.perform().map_err(ServiceError::from)?;
        }

        let status = easy.response_code().context("no response code")?;
        let headers = headers::parse_headers(&header_lines);
        tracing::debug!(status, bytes = body.len(), content_type = ?headers.content_type, "response received");

        Ok(check_response(action, status, headers, body)?)
    }
}
