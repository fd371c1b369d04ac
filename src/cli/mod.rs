// CLI module for flacmeta
//
// Command-line front end over the library: inspection commands plus the
// directory importer that turns FLAC files into catalog records.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

// Error type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] flacmeta::DecodeError),
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Error: {0}")]
    Other(String),
}
