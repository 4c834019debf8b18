//! One request end to end: validate, build the form, POST, save the result.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;
use url::Url;

use crate::action::Action;
use crate::checksum;
use crate::config::PdfpostConfig;
use crate::filename;
use crate::form::Submission;
use crate::progress::TransferProgress;
use crate::save::{self, Destination};
use crate::selection::{PageRange, Selection};
use crate::service::{self, ServiceClient, ServiceResponse};

/// Where and how to save the result.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Exact output path; takes precedence over `output_dir`.
    pub output: Option<PathBuf>,
    /// Directory for the result; falls back to the config value, then the current directory.
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    /// Prefer the Content-Disposition filename over the action's default name.
    pub server_name: bool,
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub action: Action,
    pub files: Vec<PathBuf>,
    /// Split only.
    pub pages: Option<PageRange>,
    pub output: OutputOptions,
}

/// Result of a completed job.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub action: Action,
    pub endpoint: String,
    pub status: u32,
    pub bytes: u64,
    pub saved_to: PathBuf,
    pub sha256: String,
    pub elapsed_secs: f64,
}

/// A validated request, ready to send.
#[derive(Debug, Clone)]
pub struct Job {
    selection: Selection,
    submission: Submission,
    endpoint: Url,
    client: ServiceClient,
    output: OutputOptions,
    default_dir: Option<PathBuf>,
}

impl Job {
    /// Validate the selection and resolve the endpoint. Nothing is sent.
    pub fn prepare(cfg: &PdfpostConfig, req: JobRequest) -> Result<Self> {
        let selection = Selection::validate(req.action, &req.files, cfg.max_file_bytes)?;
        let submission = Submission::new(&selection, req.pages);
        let endpoint = service::endpoint_url(&cfg.base_url, cfg.endpoint_path(req.action))?;
        tracing::debug!(
            action = %req.action,
            files = selection.files().len(),
            bytes = selection.total_bytes(),
            %endpoint,
            "job prepared"
        );
        Ok(Self {
            selection,
            submission,
            endpoint,
            client: ServiceClient::from_config(cfg),
            output: req.output,
            default_dir: cfg.output_dir.clone(),
        })
    }

    pub fn action(&self) -> Action {
        self.selection.action()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Label naming the selected file(s).
    pub fn label(&self) -> String {
        self.selection.label()
    }

    fn destination(&self, response: &ServiceResponse) -> Result<Destination> {
        if let Some(path) = &self.output.output {
            return Ok(Destination::Exact {
                path: path.clone(),
                overwrite: self.output.overwrite,
            });
        }
        let dir = match self.output.output_dir.as_ref().or(self.default_dir.as_ref()) {
            Some(d) => d.clone(),
            None => std::env::current_dir().context("current directory")?,
        };
        let name = filename::download_name(
            self.action(),
            response.headers.content_disposition.as_deref(),
            self.output.server_name,
        );
        Ok(Destination::InDir {
            dir,
            name,
            overwrite: self.output.overwrite,
        })
    }

    /// Send the request and save the result. Blocks the current thread.
    pub fn run(
        &self,
        on_progress: Option<&mut dyn FnMut(TransferProgress) -> bool>,
    ) -> Result<Outcome> {
        let started = Instant::now();
        let response = self
            .client
            .submit(&self.endpoint, &self.submission, on_progress)?;
        let dest = self.destination(&response)?;
        let saved_to = save::save_body(&response.body, &dest)?;
        let sha256 = checksum::sha256_path(&saved_to)?;
        Ok(Outcome {
            action: self.action(),
            endpoint: self.endpoint.to_string(),
            status: response.status,
            bytes: response.body.len() as u64,
            saved_to,
            sha256,
            elapsed_secs: started.elapsed().as_secs_f64(),
        })
    }

    /// Run on the blocking pool, forwarding progress snapshots to `progress_tx`.
    ///
    /// Snapshots are dropped when the channel is full. Closing the receiver
    /// does not cancel the request.
    pub async fn run_async(
        self,
        progress_tx: Option<mpsc::Sender<TransferProgress>>,
    ) -> Result<Outcome> {
        tokio::task::spawn_blocking(move || match progress_tx {
            Some(tx) => {
                let mut forward = |p: TransferProgress| {
                    let _ = tx.try_send(p);
                    true
                };
                self.run(Some(&mut forward))
            }
            None => self.run(None),
        })
        .await
        .context("upload task join")?
    }
}
