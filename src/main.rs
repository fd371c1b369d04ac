// CLI binary entry point for flacmeta

mod cli;

use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::commands;
use cli::{Commands, Config, OutputFormatter};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over the verbosity flag
    let level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.command.decode_options();

    match &config.command {
        Commands::Read {
            files,
            fields,
            output,
        } => commands::command_read(files, fields.as_deref(), output.as_deref(), &formatter)
            .context("read failed")?,
        Commands::Detect { files } => {
            commands::command_detect(files, &formatter).context("detect failed")?
        }
        Commands::Info { files, detailed } => {
            commands::command_info(files, *detailed, &formatter).context("info failed")?
        }
        Commands::ExportCover {
            file,
            output,
            index,
        } => {
            commands::command_export_cover(file, output, *index, &formatter)
                .with_context(|| format!("failed to export pictures from {}", file.display()))?;
        }
        Commands::Import {
            directory,
            pattern,
            output,
            ..
        } => {
            commands::command_import(
                directory,
                pattern.as_deref(),
                output.as_deref(),
                &options,
                &formatter,
            )
            .with_context(|| format!("import of {} failed", directory.display()))?;
        }
    }

    Ok(())
}
