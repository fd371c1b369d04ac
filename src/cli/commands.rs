// CLI command implementations
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use glob::{glob, MatchOptions, Pattern};
use serde_json::Value;

use flacmeta::{AudioFile, DecodeOptions, Metadata, TrackRecord};

use crate::cli::config::parse_fields;
use crate::cli::{CliError, CliResult, OutputFormatter};

const DEFAULT_PATTERN: &str = "*.flac";

fn open_output(output: Option<&Path>) -> CliResult<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    })
}

fn require_files(files: &[PathBuf]) -> CliResult<()> {
    if files.is_empty() {
        return Err(CliError::Other("No files specified".to_string()));
    }
    Ok(())
}

/// Keep only the requested top-level fields
fn select_fields(value: Value, fields: Option<&[String]>) -> Value {
    match (value, fields) {
        (Value::Object(obj), Some(fields)) => Value::Object(
            obj.into_iter()
                .filter(|(key, _)| fields.iter().any(|f| f == key))
                .collect(),
        ),
        (value, _) => value,
    }
}

/// Read metadata from files
pub fn command_read(
    files: &[PathBuf],
    fields: Option<&str>,
    output: Option<&Path>,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    require_files(files)?;

    let fields = parse_fields(fields);
    let mut writer = open_output(output)?;

    for path in files {
        if !path.exists() {
            formatter.print_error(&format!("File not found: {}", path.display()));
            continue;
        }

        match Metadata::from_path(path) {
            Ok(metadata) => {
                let value = select_fields(serde_json::to_value(&metadata)?, fields.as_deref());
                formatter.output_metadata(&value, &mut writer)?;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to decode metadata");
                formatter.print_error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Detect file format
pub fn command_detect(files: &[PathBuf], formatter: &OutputFormatter) -> CliResult<()> {
    require_files(files)?;

    for path in files {
        match AudioFile::open(path) {
            Ok(audio) => {
                formatter.print_info(&format!("{}: {}", path.display(), audio.file_type));
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    Ok(())
}

/// Show file information
pub fn command_info(
    files: &[PathBuf],
    detailed: bool,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    require_files(files)?;

    for path in files {
        if !path.exists() {
            formatter.print_error(&format!("File not found: {}", path.display()));
            continue;
        }

        let file_metadata = std::fs::metadata(path)?;
        let modified = file_metadata.modified().ok().map(DateTime::<Utc>::from);

        let audio = AudioFile::open(path)?;

        println!("\n{}", path.display());
        println!("{}", "─".repeat(60));
        println!("Size: {} bytes", file_metadata.len());
        if let Some(date) = modified {
            println!("Modified: {}", date.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("Format: {}", audio.file_type);

        if detailed && audio.is_flac() {
            match audio.read_metadata() {
                Ok(metadata) => print_details(&metadata),
                Err(e) => formatter.print_error(&format!("{}: {}", path.display(), e)),
            }
        }
    }

    Ok(())
}

fn print_details(metadata: &Metadata) {
    println!("\nStream:");
    println!("  Sample rate: {} Hz", metadata.sample_rate);
    println!("  Channels: {}", metadata.channels);
    println!("  Bits per sample: {}", metadata.bits_per_sample);
    println!("  Total samples: {}", metadata.total_samples);
    println!("  Duration: {:.3}s", metadata.duration.as_secs_f64());
    println!("  Bitrate: {} kbit/s", metadata.bitrate_kbps());
    println!(
        "  Block size: {}..{}, frame size: {}..{}",
        metadata.min_block_size,
        metadata.max_block_size,
        metadata.min_frame_size,
        metadata.max_frame_size
    );
    println!("  MD5: {}", hex::encode(metadata.md5_signature));
    println!("\nBlocks:");
    println!("  Vendor: {}", metadata.vendor);
    println!("  Tags: {} keys", metadata.tags_multi.len());
    println!("  Seek points: {}", metadata.seek_table.len());
    for picture in &metadata.pictures {
        println!(
            "  Picture: {} {} {}x{} ({} bytes)",
            picture.kind(),
            picture.mime,
            picture.width,
            picture.height,
            picture.data.len()
        );
    }
    if let Some(sheet) = &metadata.cue_sheet {
        println!("  Cue sheet: {} tracks", sheet.tracks.len());
    }
    for application in &metadata.applications {
        println!(
            "  Application: {} ({} bytes)",
            application.id_str(),
            application.data.len()
        );
    }
}

/// Export embedded pictures
pub fn command_export_cover(
    file: &Path,
    output_dir: &Path,
    index: Option<usize>,
    formatter: &OutputFormatter,
) -> CliResult<Vec<PathBuf>> {
    let metadata = AudioFile::open(file)?.read_metadata()?;

    let selected: Vec<(usize, &flacmeta::Picture)> = match index {
        Some(i) => {
            let picture = metadata.pictures.get(i).ok_or_else(|| {
                CliError::Other(format!(
                    "Picture index {} out of range ({} pictures)",
                    i,
                    metadata.pictures.len()
                ))
            })?;
            vec![(i, picture)]
        }
        None => metadata.pictures.iter().enumerate().collect(),
    };

    if selected.is_empty() {
        formatter.print_info(&format!("{}: no embedded pictures", file.display()));
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(output_dir)?;
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());

    let mut written = Vec::with_capacity(selected.len());
    for (i, picture) in selected {
        let target = output_dir.join(format!("{}_{}.{}", stem, i, picture.extension()));
        picture.save(&target)?;
        formatter.print_success(&format!("{} ({})", target.display(), picture.kind()));
        written.push(target);
    }

    Ok(written)
}

/// Counts reported at the end of an import
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Collect candidate files below `directory`, recursively.
///
/// `pattern` is matched case-insensitively against the file name, or against
/// the path relative to `directory` when it contains a `/`. The default
/// selects every `.flac` file.
pub fn collect_files(directory: &Path, pattern: Option<&str>) -> CliResult<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern.unwrap_or(DEFAULT_PATTERN))?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let match_relative = pattern.as_str().contains('/');
    let walk = format!("{}/**/*", Pattern::escape(&directory.to_string_lossy()));

    let mut files = Vec::new();
    for entry in glob(&walk)? {
        match entry {
            Ok(path) => {
                if !path.is_file() {
                    continue;
                }
                let matched = if match_relative {
                    let relative = path.strip_prefix(directory).unwrap_or(path.as_path());
                    pattern.matches_path_with(relative, options)
                } else {
                    path.file_name()
                        .map(|name| pattern.matches_with(&name.to_string_lossy(), options))
                        .unwrap_or(false)
                };
                if matched {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error reading path");
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Decode every file under `directory` and write one catalog record per
/// imported file. Per-file failures are logged and never abort the import.
pub fn command_import(
    directory: &Path,
    pattern: Option<&str>,
    output: Option<&Path>,
    options: &DecodeOptions,
    formatter: &OutputFormatter,
) -> CliResult<ImportSummary> {
    if !directory.is_dir() {
        return Err(CliError::FileNotFound(directory.display().to_string()));
    }

    let files = collect_files(directory, pattern)?;
    let mut summary = ImportSummary::default();

    if files.is_empty() {
        tracing::info!(path = %directory.display(), "No matching files found");
        return Ok(summary);
    }
    tracing::info!(count = files.len(), "Found FLAC files");

    let mut writer = open_output(output)?;
    let mut seen_checksums = HashSet::new();

    for path in &files {
        let metadata = match Metadata::from_path_with(path, options) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ingest failed");
                summary.failed += 1;
                continue;
            }
        };

        // An all-zero signature means the encoder did not compute one
        let has_checksum = metadata.md5_signature != [0u8; 16];
        if has_checksum && !seen_checksums.insert(metadata.md5_signature) {
            tracing::debug!(path = %path.display(), "Duplicate checksum, skipping");
            summary.skipped += 1;
            continue;
        }

        let record = TrackRecord::from_metadata(path, &metadata);
        writeln!(writer, "{}", serde_json::to_string(&record)?)?;
        tracing::info!(path = %record.path, "Imported track file");
        summary.imported += 1;
    }

    writer.flush()?;

    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        failed = summary.failed,
        "Import done"
    );
    formatter.print_info(&format!(
        "Completed: {} imported, {} skipped, {} failed",
        summary.imported, summary.skipped, summary.failed
    ));

    Ok(summary)
}
