//! Serialization of pair plans as JSON or JSON Lines.
//!
//! Used by dry runs to show which composites a run would produce without
//! decoding or writing any image.

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::types::Pair;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// One line of a plan: the two sources and where their composite would go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedComposite {
    pub first: PathBuf,
    pub second: PathBuf,
    pub output: PathBuf,
}

impl PlannedComposite {
    /// Plan entry for `pair`; `output` is relative when `output_dir` is `None`.
    pub fn new(pair: &Pair, output_dir: Option<&Path>) -> Self {
        let output = match output_dir {
            Some(dir) => pair.output_path(dir),
            None => PathBuf::from(pair.output_name()),
        };
        Self {
            first: pair.first.clone(),
            second: pair.second.clone(),
            output,
        }
    }
}

/// A writer that serializes records as a JSON array or as JSON Lines.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON array format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write every record in `items`.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json if self.pretty => {
                serde_json::to_writer_pretty(&mut self.writer, items).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                for item in items {
                    serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
            }
        }
        self.items_written += items.len();
        Ok(())
    }

    /// Get the number of records written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Vec<PlannedComposite> {
        vec![
            PlannedComposite::new(&Pair::new("/a/x.jpg", "/b/y.jpeg"), Some(Path::new("/out"))),
            PlannedComposite::new(&Pair::new("/a/z.JPG", "/b/w.jpg"), None),
        ]
    }

    #[test]
    fn test_planned_output_paths() {
        let plan = plan();
        assert_eq!(plan[0].output, PathBuf::from("/out/x_y.jpeg"));
        assert_eq!(plan[1].output, PathBuf::from("z_w.jpg"));
    }

    #[test]
    fn test_write_jsonl() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, false);
        writer.write_all(&plan()).unwrap();
        assert_eq!(writer.items_written(), 2);

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"output\":\"/out/x_y.jpeg\""));
    }

    #[test]
    fn test_write_all_json_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, true);
        writer.write_all(&plan()).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with('['));
        assert!(output.trim().ends_with(']'));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("NDJSON"), Some(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }
}
