//! CLI for pdfpost.

mod commands;
mod spinner;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pdfpost_core::action::Action;
use pdfpost_core::config::{self, PdfpostConfig};
use pdfpost_core::job::{JobRequest, OutputOptions};
use pdfpost_core::selection::PageRange;
use std::path::PathBuf;

use commands::{run_completions, run_man, run_submit, Report};

/// Top-level CLI for pdfpost.
#[derive(Debug, Parser)]
#[command(name = "pdfpost", version)]
#[command(about = "pdfpost: send PDFs and images to a PDF service and save the result", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by every command that talks to the service.
#[derive(Debug, Clone, Default, Args)]
pub struct SubmitArgs {
    /// Save the result to exactly this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the result (default: config `output_dir`, else the current directory).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace an existing file instead of picking a numbered name.
    #[arg(long)]
    pub overwrite: bool,

    /// Use the filename suggested by the service, if any.
    #[arg(long)]
    pub server_name: bool,

    /// Service base URL for this run (overrides config `base_url`).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,

    /// No spinner or selection label.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Compress a PDF.
    Compress {
        /// PDF file to compress.
        file: PathBuf,
        #[command(flatten)]
        opts: SubmitArgs,
    },

    /// Convert an image (JPEG, PNG, GIF, BMP, TIFF, WebP) to PDF.
    Image {
        /// Image file to convert.
        file: PathBuf,
        #[command(flatten)]
        opts: SubmitArgs,
    },

    /// Merge two or more PDFs, in the order given.
    Merge {
        /// PDF files to merge.
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        opts: SubmitArgs,
    },

    /// Extract a page range from a PDF.
    Split {
        /// PDF file to split.
        file: PathBuf,
        /// First page to keep (1-based).
        #[arg(long, default_value_t = 1, value_name = "N")]
        start: u32,
        /// Last page to keep (inclusive).
        #[arg(long, default_value_t = 1, value_name = "N")]
        end: u32,
        #[command(flatten)]
        opts: SubmitArgs,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

/// Turn an action subcommand into a job request plus its display options.
fn into_request(
    action: Action,
    files: Vec<PathBuf>,
    pages: Option<PageRange>,
    opts: &SubmitArgs,
) -> JobRequest {
    JobRequest {
        action,
        files,
        pages,
        output: OutputOptions {
            output: opts.output.clone(),
            output_dir: opts.output_dir.clone(),
            overwrite: opts.overwrite,
            server_name: opts.server_name,
        },
    }
}

/// Apply per-run overrides on top of the loaded config.
fn effective_config(mut cfg: PdfpostConfig, opts: &SubmitArgs) -> PdfpostConfig {
    if let Some(url) = &opts.base_url {
        cfg.base_url = url.clone();
    }
    cfg
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let (request, opts) = match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            CliCommand::Compress { file, opts } => {
                (into_request(Action::Compress, vec![file], None, &opts), opts)
            }
            CliCommand::Image { file, opts } => {
                (into_request(Action::ImageToPdf, vec![file], None, &opts), opts)
            }
            CliCommand::Merge { files, opts } => {
                (into_request(Action::Merge, files, None, &opts), opts)
            }
            CliCommand::Split {
                file,
                start,
                end,
                opts,
            } => {
                let pages = PageRange::new(start, end)?;
                (into_request(Action::Split, vec![file], Some(pages), &opts), opts)
            }
        };

        let cfg = effective_config(config::load_or_init()?, &opts);
        tracing::debug!("loaded config: {:?}", cfg);

        let report = Report {
            json: opts.json,
            quiet: opts.quiet,
        };
        run_submit(&cfg, request, report).await
    }
}

#[cfg(test)]
mod tests;
