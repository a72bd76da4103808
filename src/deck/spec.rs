//! Declarative deck description.
//!
//! A deck is a JSON document listing pages and their blocks. Text fields may
//! carry `{{dotted.path}}` placeholders that are resolved against the runtime
//! configuration when the deck is assembled.
//!
//! ```json
//! {
//!   "metadata": { "title": "Tracker" },
//!   "pages": [
//!     {
//!       "title": "Association",
//!       "blocks": [
//!         { "type": "bullets", "items": ["Method: {{association.method|?}}"] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use crate::model::{
    Alignment, Anchor, CanvasSize, CodeKind, Color, DiagramFit, Metadata, Role, TextFormat, Theme,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn default_fallback() -> String {
    "n/a".to_string()
}

fn default_subtitle_role() -> Role {
    Role::Subtitle
}

/// A whole deck: metadata, optional theme overrides, and pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSpec {
    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Theme override; the built-in theme is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// Canvas override; widescreen when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSize>,

    /// Fallback for placeholders that do not name one
    #[serde(default = "default_fallback")]
    pub default_fallback: String,

    /// Pages in output order
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl DeckSpec {
    /// Parse a deck from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let deck: DeckSpec = serde_json::from_str(text)?;
        Ok(deck)
    }

    /// Load a deck from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let deck = Self::from_json_str(&text)
            .map_err(|e| Error::InvalidDeck(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded deck {} ({} pages)", path.display(), deck.pages.len());
        Ok(deck)
    }

    /// Get the number of declared pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl Default for DeckSpec {
    fn default() -> Self {
        Self {
            metadata: Metadata::default(),
            theme: None,
            canvas: None,
            default_fallback: default_fallback(),
            pages: Vec::new(),
        }
    }
}

/// One page of a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Page title, placed first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Blocks in declaration order
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

/// A bullet entry: either bare text or text with a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulletSpec {
    /// Top-level item
    Text(String),
    /// Item with an explicit indent level
    Item {
        /// Item text
        text: String,
        /// Indent level (0-2)
        #[serde(default)]
        level: u8,
    },
}

impl BulletSpec {
    /// Item text.
    pub fn text(&self) -> &str {
        match self {
            BulletSpec::Text(text) | BulletSpec::Item { text, .. } => text,
        }
    }

    /// Indent level.
    pub fn level(&self) -> u8 {
        match self {
            BulletSpec::Text(_) => 0,
            BulletSpec::Item { level, .. } => *level,
        }
    }
}

impl BlockSpec {
    /// Alignment, slant and ink declared on a title or subtitle.
    pub fn text_format(&self) -> Option<TextFormat> {
        match self {
            BlockSpec::Title {
                alignment,
                italic,
                color,
                ..
            }
            | BlockSpec::Subtitle {
                alignment,
                italic,
                color,
                ..
            } => Some(TextFormat {
                alignment: *alignment,
                italic: *italic,
                color: *color,
            }),
            _ => None,
        }
    }
}

/// A block declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockSpec {
    /// Extra title block
    Title {
        text: String,
        #[serde(default)]
        anchor: Option<Anchor>,
        #[serde(default)]
        alignment: Alignment,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        color: Option<Color>,
    },

    /// Subtitle or small print line
    Subtitle {
        text: String,
        #[serde(default)]
        anchor: Option<Anchor>,
        #[serde(default = "default_subtitle_role")]
        role: Role,
        #[serde(default)]
        alignment: Alignment,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        color: Option<Color>,
    },

    /// Bullet list
    Bullets {
        items: Vec<BulletSpec>,
        #[serde(default)]
        offset: Option<f32>,
    },

    /// Code or console listing
    Code {
        code: String,
        #[serde(default)]
        kind: CodeKind,
        #[serde(default)]
        offset: Option<f32>,
    },

    /// Table; cells may be any JSON scalar
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
        #[serde(default)]
        column_widths: Option<Vec<f32>>,
        #[serde(default)]
        alignments: Option<Vec<Alignment>>,
        #[serde(default)]
        offset: Option<f32>,
    },

    /// Diagram image, given directly or rendered from a source file
    Diagram {
        #[serde(default)]
        image: Option<PathBuf>,
        #[serde(default)]
        source: Option<PathBuf>,
        #[serde(default)]
        caption: Option<String>,
        width: u32,
        height: u32,
        #[serde(default)]
        fit: DiagramFit,
        #[serde(default)]
        offset: Option<f32>,
    },
}
