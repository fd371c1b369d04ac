// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use flacmeta::DecodeOptions;

/// flacmeta - FLAC metadata inspection and catalog import tool
#[derive(Parser, Debug)]
#[command(name = "flacmeta")]
#[command(about = "Decode FLAC metadata blocks and import FLAC libraries", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging; RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from FLAC file(s)
    Read {
        /// FLAC file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Metadata fields to display (comma-separated)
        #[arg(long)]
        fields: Option<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect whether files are FLAC
    Detect {
        /// File path(s)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Show file information
    Info {
        /// FLAC file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Show stream parameters and block counts
        #[arg(short, long)]
        detailed: bool,
    },

    /// Export embedded pictures
    ExportCover {
        /// FLAC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for images
        #[arg(short, long)]
        output: PathBuf,

        /// Picture index (exports every picture when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Import a directory of FLAC files as catalog records (JSON lines)
    Import {
        /// Directory to scan
        #[arg(short, long)]
        directory: PathBuf,

        /// File name pattern matched in every subdirectory, ignoring case
        /// (e.g. "*live*.flac"); defaults to "*.flac"
        #[arg(short, long)]
        pattern: Option<String>,

        /// Write records to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Largest embedded picture to accept, in MiB
        #[arg(long, value_name = "MIB")]
        max_picture_mib: Option<u32>,
    },
}

impl Commands {
    /// Decode limits for commands that accept overrides
    pub fn decode_options(&self) -> DecodeOptions {
        let mut options = DecodeOptions::default();
        if let Commands::Import {
            max_picture_mib: Some(mib),
            ..
        } = self
        {
            options.max_picture_size = mib.saturating_mul(1 << 20).min(options.max_picture_size);
        }
        options
    }
}

/// Split a comma-separated field list
pub fn parse_fields(fields: Option<&str>) -> Option<Vec<String>> {
    fields.map(|list| {
        list.split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    })
}
