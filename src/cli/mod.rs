use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "epubdiff",
    about = "Visual regression harness for EPUB reader screenshots",
    version,
    author,
    long_about = None
)]
pub struct EpubDiffCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose a labeled side-by-side comparison image
    Compose {
        /// Book slug (e.g. frankenstein)
        book: String,

        /// Chapter number (0-based)
        chapter: String,

        /// Screenshot and output directory (default: /tmp/reader-tests)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Judge an app screenshot against a reference screenshot
    Judge {
        /// Path to reference screenshot (from EPUB.js)
        reference: PathBuf,

        /// Path to app screenshot
        candidate: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(short, long, default_value = "false")]
        pretty: bool,
    },
}
