//! Transfer progress for one request (upload then download).
//!
//! Reported from the libcurl progress callback; the CLI turns it into a busy
//! indicator.

/// Snapshot of bytes moved so far. Totals are 0 while unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransferProgress {
    pub uploaded: u64,
    pub upload_total: u64,
    pub downloaded: u64,
    pub download_total: u64,
}

/// Coarse phase of a request, derived from a progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uploading,
    /// Upload finished, nothing received yet: the service is working.
    Processing,
    Downloading,
}

impl TransferProgress {
    pub(crate) fn from_curl(dltotal: f64, dlnow: f64, ultotal: f64, ulnow: f64) -> Self {
        Self {
            uploaded: ulnow.max(0.0) as u64,
            upload_total: ultotal.max(0.0) as u64,
            downloaded: dlnow.max(0.0) as u64,
            download_total: dltotal.max(0.0) as u64,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.downloaded > 0 {
            Phase::Downloading
        } else if self.upload_total > 0 && self.uploaded >= self.upload_total {
            Phase::Processing
        } else {
            Phase::Uploading
        }
    }

    /// Fraction of the current phase done in [0.0, 1.0], None while the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        let (done, total) = match self.phase() {
            Phase::Uploading => (self.uploaded, self.upload_total),
            Phase::Processing => return None,
            Phase::Downloading => (self.downloaded, self.download_total),
        };
        if total == 0 {
            return None;
        }
        Some((done as f64 / total as f64).min(1.0))
    }
}
