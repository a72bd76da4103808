//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed drawable area of every page, in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
}

impl CanvasSize {
    /// Create a canvas with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 16:9 slide (13.333 x 7.5 inches).
    pub fn widescreen() -> Self {
        Self::new(960.0, 540.0)
    }

    /// 4:3 slide (10 x 7.5 inches).
    pub fn standard() -> Self {
        Self::new(720.0, 540.0)
    }

}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::widescreen()
    }
}

/// Document metadata handed to the output sink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subtitle
    pub subtitle: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// When the document was assembled
    pub generated_at: Option<DateTime<Utc>>,

    /// Total number of pages
    pub page_count: u32,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Header lines for text outputs.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(ref title) = self.title {
            lines.push(format!("title: {}", title));
        }
        if let Some(ref subtitle) = self.subtitle {
            lines.push(format!("subtitle: {}", subtitle));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: {}", author));
        }
        if let Some(ref generated) = self.generated_at {
            lines.push(format!("generated: {}", generated.to_rfc3339()));
        }
        lines.push(format!("pages: {}", self.page_count));
        lines
    }
}
