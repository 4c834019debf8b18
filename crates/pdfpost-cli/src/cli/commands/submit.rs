//! `pdfpost compress|image|merge|split` – validate, upload, save.

use anyhow::{Context, Result};
use pdfpost_core::config::PdfpostConfig;
use pdfpost_core::job::{Job, JobRequest, Outcome};
use std::io::{IsTerminal, Write};
use tokio::sync::mpsc;

use crate::cli::spinner;

/// How the outcome is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct Report {
    pub json: bool,
    pub quiet: bool,
}

/// Pretty JSON with `--json`, otherwise the saved path and checksum lines.
pub fn write_outcome(out: &mut impl Write, outcome: &Outcome, report: Report) -> Result<()> {
    if report.json {
        let json = serde_json::to_string_pretty(outcome).context("serialize outcome")?;
        writeln!(out, "{}", json)?;
    } else {
        writeln!(
            out,
            "Saved {} ({} bytes)",
            outcome.saved_to.display(),
            outcome.bytes
        )?;
        writeln!(out, "sha256 {}", outcome.sha256)?;
    }
    Ok(())
}

/// The spinner draws `\r` frames, so it only runs when stderr is a terminal.
pub fn wants_spinner(report: Report, stderr_is_terminal: bool) -> bool {
    !report.quiet && !report.json && stderr_is_terminal
}

pub async fn run_submit(cfg: &PdfpostConfig, request: JobRequest, report: Report) -> Result<()> {
    let job = Job::prepare(cfg, request)?;
    if !report.quiet && !report.json {
        eprintln!("Selected: {}", job.label());
    }
    let show_progress = wants_spinner(report, std::io::stderr().is_terminal());

    let action = job.action();
    let (result, indicator) = if show_progress {
        let (tx, rx) = mpsc::channel(16);
        let handle = spinner::spawn(rx, action);
        (job.run_async(Some(tx)).await, Some(handle))
    } else {
        (job.run_async(None).await, None)
    };
    // The spinner stops once the job drops its sender, whatever the result.
    if let Some(handle) = indicator {
        let _ = handle.await;
    }

    let outcome = result?;
    tracing::info!(
        %action,
        status = outcome.status,
        bytes = outcome.bytes,
        saved_to = %outcome.saved_to.display(),
        elapsed_secs = outcome.elapsed_secs,
        "job finished"
    );
    write_outcome(&mut std::io::stdout().lock(), &outcome, report)
}
