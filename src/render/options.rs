//! Output options.

use super::{JsonFormat, JsonSink, OutputSink, TextSink};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Artifact type produced by a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Serialized layout
    #[default]
    Json,
    /// Human-readable outline
    Text,
}

impl OutputFormat {
    /// Guess the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(Error::Other(format!("unknown output format: {}", other))),
        }
    }
}

/// Options for the sink a build writes through.
#[derive(Debug, Clone, Default)]
pub struct SinkOptions {
    /// Artifact type
    pub format: OutputFormat,

    /// JSON layout (ignored for text)
    pub json: JsonFormat,

    /// Destination file
    pub output: Option<PathBuf>,
}

impl SinkOptions {
    /// Create new sink options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the destination, inferring the format from its extension.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.format = OutputFormat::from_path(&path);
        self.output = Some(path);
        self
    }

    /// Set the artifact type.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Emit compact JSON.
    pub fn compact(mut self) -> Self {
        self.json = JsonFormat::Compact;
        self
    }

    /// Build the sink these options describe.
    pub fn open(&self) -> Result<Box<dyn OutputSink>> {
        let path = self
            .output
            .clone()
            .ok_or_else(|| Error::SinkWriteFailure("no output path configured".to_string()))?;
        Ok(match self.format {
            OutputFormat::Json => Box::new(JsonSink::new(path, self.json)),
            OutputFormat::Text => Box::new(TextSink::new(path)),
        })
    }
}
