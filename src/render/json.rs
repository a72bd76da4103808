//! JSON rendering for laid-out documents.

use super::sink::{persist_atomically, OutputSink};
use crate::error::{Error, Result};
use crate::layout::{LaidOutDocument, PlacedBlock, PlacedPage};
use crate::model::{CanvasSize, Metadata, Theme};
use serde::Serialize;
use std::path::PathBuf;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a laid-out document to JSON.
pub fn to_json(doc: &LaidOutDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::SinkWriteFailure(format!("JSON serialization error: {}", e)))
}

#[derive(Serialize)]
struct JsonDeck<'a> {
    metadata: &'a Metadata,
    canvas: CanvasSize,
    theme: &'a Theme,
    pages: &'a [PlacedPage],
}

/// Sink that writes the whole deck, theme included, as one JSON file.
///
/// Nothing touches the filesystem until [`OutputSink::finish`].
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: Option<PathBuf>,
    format: JsonFormat,
    theme: Theme,
    canvas: CanvasSize,
    metadata: Metadata,
    pages: Vec<PlacedPage>,
    output: Option<String>,
}

impl JsonSink {
    /// Sink that persists to `path`.
    pub fn new(path: impl Into<PathBuf>, format: JsonFormat) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::in_memory(format)
        }
    }

    /// Sink that only keeps the rendered string.
    pub fn in_memory(format: JsonFormat) -> Self {
        Self {
            path: None,
            format,
            theme: Theme::default(),
            canvas: CanvasSize::default(),
            metadata: Metadata::default(),
            pages: Vec::new(),
            output: None,
        }
    }

    /// The rendered JSON, once finished.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl OutputSink for JsonSink {
    fn begin_document(
        &mut self,
        canvas: CanvasSize,
        theme: &Theme,
        metadata: &Metadata,
    ) -> Result<()> {
        self.canvas = canvas;
        self.theme = theme.clone();
        self.metadata = metadata.clone();
        self.pages.clear();
        self.output = None;
        Ok(())
    }

    fn begin_page(&mut self, number: u32) -> Result<()> {
        self.pages.push(PlacedPage::new(number));
        Ok(())
    }

    fn draw(&mut self, page: u32, block: &PlacedBlock) -> Result<()> {
        match self.pages.last_mut() {
            Some(current) if current.number == page => {
                current.elements.push(block.clone());
                Ok(())
            }
            _ => Err(Error::SinkWriteFailure(format!(
                "draw on page {} before begin_page",
                page
            ))),
        }
    }

    fn finish(&mut self) -> Result<()> {
        let deck = JsonDeck {
            metadata: &self.metadata,
            canvas: self.canvas,
            theme: &self.theme,
            pages: &self.pages,
        };
        let json = serialize(&deck, self.format)?;
        if let Some(ref path) = self.path {
            persist_atomically(path, json.as_bytes())?;
        }
        self.output = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Geometry, Primitive, StyledParagraph};
    use crate::model::{Alignment, BlockKind, Role};
    use crate::render::emit;

    fn doc() -> LaidOutDocument {
        let theme = Theme::default();
        let mut page = PlacedPage::new(1);
        page.elements.push(PlacedBlock {
            kind: BlockKind::Title,
            geometry: Geometry::new(43.2, 21.6, 873.6, 64.8),
            primitive: Primitive::Text {
                paragraphs: vec![StyledParagraph::new("Test", theme.resolve(Role::Title))],
                alignment: Alignment::Left,
                wrap: true,
            },
        });
        LaidOutDocument {
            metadata: Metadata::with_title("Test"),
            canvas: CanvasSize::widescreen(),
            pages: vec![page],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&doc(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_sink_includes_theme() {
        let mut sink = JsonSink::in_memory(JsonFormat::Compact);
        emit(&doc(), &Theme::default(), &mut sink).unwrap();

        let value: serde_json::Value = serde_json::from_str(sink.output().unwrap()).unwrap();
        assert_eq!(value["theme"]["primary"], "#0F172A");
        assert_eq!(value["canvas"]["width"], 960.0);
        assert_eq!(value["pages"][0]["elements"][0]["primitive"]["type"], "text");
    }

    #[test]
    fn test_json_sink_writes_only_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let mut sink = JsonSink::new(&path, JsonFormat::Pretty);

        let document = doc();
        sink.begin_document(document.canvas, &Theme::default(), &document.metadata)
            .unwrap();
        sink.begin_page(1).unwrap();
        sink.draw(1, &document.pages[0].elements[0]).unwrap();
        sink.end_page(1).unwrap();
        assert!(!path.exists());

        sink.finish().unwrap();
        assert!(path.exists());
    }
}
