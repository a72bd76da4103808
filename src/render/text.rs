//! Plain text outline rendering.

use super::sink::{persist_atomically, OutputSink};
use crate::error::Result;
use crate::layout::{LaidOutDocument, PlacedBlock};
use crate::model::{BlockKind, CanvasSize, Metadata, Theme};
use std::fmt::Write;
use std::path::PathBuf;

/// Convert a laid-out document to a plain text outline.
pub fn to_text(doc: &LaidOutDocument) -> Result<String> {
    let mut sink = TextSink::in_memory();
    super::emit(doc, &Theme::default(), &mut sink)?;
    Ok(sink.output.unwrap_or_default())
}

/// Sink that writes a human-readable outline of every page.
///
/// Each page starts with a `== Page N ==` banner; blocks follow with their
/// kind and placed region so that layout can be reviewed without a viewer.
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    path: Option<PathBuf>,
    buffer: String,
    output: Option<String>,
}

impl TextSink {
    /// Sink that persists to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sink that only keeps the rendered string.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// The rendered outline, once finished.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

impl OutputSink for TextSink {
    fn begin_document(
        &mut self,
        canvas: CanvasSize,
        _theme: &Theme,
        metadata: &Metadata,
    ) -> Result<()> {
        self.buffer.clear();
        self.output = None;
        for line in metadata.header_lines() {
            let _ = writeln!(self.buffer, "{}", line);
        }
        let _ = writeln!(self.buffer, "canvas: {:.0}x{:.0}pt", canvas.width, canvas.height);
        Ok(())
    }

    fn begin_page(&mut self, number: u32) -> Result<()> {
        let _ = write!(self.buffer, "\n== Page {} ==\n", number);
        Ok(())
    }

    fn draw(&mut self, _page: u32, block: &PlacedBlock) -> Result<()> {
        let g = &block.geometry;
        let _ = writeln!(
            self.buffer,
            "[{}] ({:.1}, {:.1}) {:.1}x{:.1}",
            label(block.kind),
            g.x,
            g.y,
            g.width,
            g.height
        );
        if let Some(text) = block.primitive.plain_text() {
            for line in text.lines() {
                let _ = writeln!(self.buffer, "    {}", line);
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let text = std::mem::take(&mut self.buffer);
        if let Some(ref path) = self.path {
            persist_atomically(path, text.as_bytes())?;
        }
        self.output = Some(text);
        Ok(())
    }
}

fn label(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Title => "title",
        BlockKind::Subtitle => "subtitle",
        BlockKind::BulletList => "bullets",
        BlockKind::CodeBlock => "code",
        BlockKind::Table => "table",
        BlockKind::Diagram => "diagram",
        BlockKind::Caption => "caption",
    }
}
