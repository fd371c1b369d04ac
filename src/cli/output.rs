// Output formatting for CLI

use crate::cli::config::OutputFormat;
use crate::cli::CliResult;
use serde_json::Value;
use std::io::Write;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output metadata
    pub fn output_metadata(&self, metadata: &Value, writer: &mut dyn Write) -> CliResult<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(metadata)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(metadata)?)?;
            }
            OutputFormat::KeyValue => {
                self.output_key_value(metadata, writer)?;
            }
            OutputFormat::Table => {
                self.output_table(metadata, writer)?;
            }
        }
        Ok(())
    }

    /// Output as key-value pairs
    fn output_key_value(&self, metadata: &Value, writer: &mut dyn Write) -> CliResult<()> {
        if let Some(obj) = metadata.as_object() {
            let mut items: Vec<_> = obj.iter().collect();
            items.sort_by(|a, b| a.0.cmp(b.0));

            for (key, value) in items {
                writeln!(writer, "{}: {}", key, format_value(value))?;
            }
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, metadata: &Value, writer: &mut dyn Write) -> CliResult<()> {
        if let Some(obj) = metadata.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;

            for (key, value) in obj {
                writeln!(
                    writer,
                    "{:<width$}{}",
                    format!("{}:", key),
                    format_value(value),
                    width = max_key_len + 2
                )?;
            }

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Format a JSON value for single-line display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else if arr.iter().all(|v| v.is_string()) {
                arr.iter().map(format_value).collect::<Vec<_>>().join("; ")
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                "{}".to_string()
            } else if obj.values().all(|v| v.is_string()) {
                obj.iter()
                    .map(|(k, v)| format!("{}={}", k, format_value(v)))
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                format!("{{{} items}}", obj.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_value_is_sorted() {
        let formatter = OutputFormatter::new(OutputFormat::KeyValue, true);
        let mut out = Vec::new();
        formatter
            .output_metadata(&json!({"vendor": "x", "channels": 2}), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "channels: 2\nvendor: x\n");
    }

    #[test]
    fn collections_are_summarized() {
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!(["A", "B"])), "A; B");
        assert_eq!(format_value(&json!({"ARTIST": "A"})), "ARTIST=A");
        assert_eq!(format_value(&json!({"a": [1]})), "{1 items}");
        assert_eq!(format_value(&Value::Null), "(null)");
    }
}
