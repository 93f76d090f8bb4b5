// Output formatting for CLI

use clap::ValueEnum;
use mp3info::Mp3Info;
use serde_json::Value;
use std::io::Write;

use super::CliResult;

/// Output format options
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

/// Format and output scan results
pub struct OutputFormatter {
    format: OutputFormat,
    pub quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one scan result
    pub fn output_info(&self, info: &Mp3Info, writer: &mut impl Write) -> CliResult<()> {
        let value = serde_json::to_value(info)?;
        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(&value)?)?,
            OutputFormat::KeyValue => {
                for (key, value) in flatten(&value) {
                    writeln!(writer, "{}: {}", key, value)?;
                }
            }
            OutputFormat::Table => self.output_table(&value, writer)?,
        }
        Ok(())
    }

    fn output_table(&self, value: &Value, writer: &mut impl Write) -> CliResult<()> {
        let rows = flatten(value);
        let max_key_len = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        for (key, value) in &rows {
            writeln!(writer, "{:<width$} {}", format!("{}:", key), value, width = max_key_len + 2)?;
        }
        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
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

/// Flatten nested objects into sorted `a.b` keys.
fn flatten(value: &Value) -> Vec<(String, String)> {
    fn walk(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
        match value {
            Value::Object(obj) => {
                for (key, child) in obj {
                    let key = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    walk(&key, child, rows);
                }
            }
            other => rows.push((prefix.to_string(), format_value(other))),
        }
    }

    let mut rows = Vec::new();
    walk("", value, &mut rows);
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

/// Format a JSON leaf for display
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} items}}", obj.len()),
    }
}

/// `m:ss` for display, rounding to whole seconds.
pub fn format_duration(secs: f64) -> String {
    let total = secs.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Progress indicator for batch operations
pub struct ProgressBar {
    total: usize,
    current: usize,
    show: bool,
}

impl ProgressBar {
    pub fn new(total: usize, show: bool) -> Self {
        Self {
            total,
            current: 0,
            show,
        }
    }

    pub fn increment(&mut self) {
        self.current += 1;
        if self.show && self.total > 0 {
            let percent = (self.current * 100) / self.total;
            eprint!("\r[{}/{}] ({}%)", self.current, self.total, percent);
            if self.current == self.total {
                eprintln!();
            }
            std::io::stderr().flush().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let value = json!({
            "bitrate": 128,
            "id3": { "title": "Song", "track": null },
            "vbr": false
        });
        let rows = flatten(&value);
        assert_eq!(
            rows,
            vec![
                ("bitrate".to_string(), "128".to_string()),
                ("id3.title".to_string(), "Song".to_string()),
                ("id3.track".to_string(), "(null)".to_string()),
                ("vbr".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59.6), "1:00");
        assert_eq!(format_duration(245.2), "4:05");
        assert_eq!(format_duration(0.0), "0:00");
    }
}
