//! Busy indicator on stderr while a request is in flight.

use pdfpost_core::action::Action;
use pdfpost_core::progress::{Phase, TransferProgress};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK_MS: u64 = 120;

/// Status text for one progress snapshot.
pub(crate) fn status_line(action: Action, frame: char, p: &TransferProgress) -> String {
    let pct = p
        .fraction()
        .map(|f| format!(" {:>3.0}%", f * 100.0))
        .unwrap_or_default();
    let what = match p.phase() {
        Phase::Uploading => "uploading",
        Phase::Processing => "waiting for service",
        Phase::Downloading => "downloading",
    };
    format!("{} {}: {}{}", frame, action, what, pct)
}

/// Draw until `rx` closes, then clear the line.
pub fn spawn(mut rx: mpsc::Receiver<TransferProgress>, action: Action) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut latest = TransferProgress::default();
        let mut tick = tokio::time::interval(Duration::from_millis(TICK_MS));
        let mut frame = 0usize;
        let mut width = 0usize;
        loop {
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(p) => latest = p,
                    None => break,
                },
                _ = tick.tick() => {
                    let line = status_line(action, FRAMES[frame % FRAMES.len()], &latest);
                    frame += 1;
                    width = width.max(line.len());
                    draw(&format!("\r{:<width$}", line, width = width));
                }
            }
        }
        draw(&format!("\r{:width$}\r", "", width = width));
    })
}

fn draw(text: &str) {
    let mut err = std::io::stderr().lock();
    let _ = err.write_all(text.as_bytes());
    let _ = err.flush();
}
