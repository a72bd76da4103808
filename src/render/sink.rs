//! Output sink contract.
//!
//! A sink receives the canvas, the theme, and every placed block in page
//! order, then persists a single artifact in [`OutputSink::finish`]. A build
//! that fails before `finish` must leave nothing behind, so file-backed
//! sinks buffer in memory and write through [`persist_atomically`].
//!
//! # Example
//!
//! ```
//! use deckwright::layout::PlacedBlock;
//! use deckwright::model::{CanvasSize, Metadata, Theme};
//! use deckwright::render::OutputSink;
//!
//! #[derive(Default)]
//! struct CountingSink {
//!     blocks: usize,
//! }
//!
//! impl OutputSink for CountingSink {
//!     fn begin_document(
//!         &mut self,
//!         _canvas: CanvasSize,
//!         _theme: &Theme,
//!         _metadata: &Metadata,
//!     ) -> deckwright::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, _page: u32, _block: &PlacedBlock) -> deckwright::Result<()> {
//!         self.blocks += 1;
//!         Ok(())
//!     }
//!
//!     fn finish(&mut self) -> deckwright::Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::layout::{LaidOutDocument, PlacedBlock, PlacedPage};
use crate::model::{CanvasSize, Metadata, Theme};
use std::io::Write;
use std::path::Path;

/// Receives styled draw instructions and persists the final artifact.
pub trait OutputSink {
    /// Called once before any page.
    fn begin_document(
        &mut self,
        canvas: CanvasSize,
        theme: &Theme,
        metadata: &Metadata,
    ) -> Result<()>;

    /// Called at the start of each page.
    ///
    /// # Arguments
    /// * `number` - The 1-indexed page number
    fn begin_page(&mut self, number: u32) -> Result<()> {
        let _ = number;
        Ok(())
    }

    /// Draw one placed block on the current page.
    fn draw(&mut self, page: u32, block: &PlacedBlock) -> Result<()>;

    /// Called at the end of each page.
    fn end_page(&mut self, number: u32) -> Result<()> {
        let _ = number;
        Ok(())
    }

    /// Persist the artifact. Only called when every page was drawn.
    fn finish(&mut self) -> Result<()>;
}

/// Feed a laid-out document through a sink, ending with `finish`.
pub fn emit<S: OutputSink + ?Sized>(
    doc: &LaidOutDocument,
    theme: &Theme,
    sink: &mut S,
) -> Result<()> {
    sink.begin_document(doc.canvas, theme, &doc.metadata)?;
    for page in &doc.pages {
        sink.begin_page(page.number)?;
        for block in &page.elements {
            sink.draw(page.number, block)?;
        }
        sink.end_page(page.number)?;
    }
    sink.finish()
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The destination only appears once the whole artifact is on disk.
pub fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let fail = |e: std::io::Error| {
        Error::SinkWriteFailure(format!("{}: {}", path.display(), e))
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    file.write_all(bytes).map_err(fail)?;
    file.flush().map_err(fail)?;
    file.persist(path).map_err(|e| fail(e.error))?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Sink that keeps everything in memory.
///
/// Useful for tests and for callers that post-process the layout.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    canvas: Option<CanvasSize>,
    metadata: Metadata,
    pages: Vec<PlacedPage>,
    finished: bool,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages drawn so far.
    pub fn pages(&self) -> &[PlacedPage] {
        &self.pages
    }

    /// Check if `finish` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The collected document, once finished.
    pub fn into_document(self) -> Option<LaidOutDocument> {
        if !self.finished {
            return None;
        }
        Some(LaidOutDocument {
            metadata: self.metadata,
            canvas: self.canvas?,
            pages: self.pages,
        })
    }
}

impl OutputSink for MemorySink {
    fn begin_document(
        &mut self,
        canvas: CanvasSize,
        _theme: &Theme,
        metadata: &Metadata,
    ) -> Result<()> {
        self.canvas = Some(canvas);
        self.metadata = metadata.clone();
        self.pages.clear();
        self.finished = false;
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
                "draw on page {} outside begin_page/end_page",
                page
            ))),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Geometry, Primitive};
    use crate::model::{BlockKind, Color};

    fn doc() -> LaidOutDocument {
        let mut page = PlacedPage::new(1);
        page.elements.push(PlacedBlock {
            kind: BlockKind::CodeBlock,
            geometry: Geometry::new(10.0, 10.0, 100.0, 50.0),
            primitive: Primitive::Rect {
                fill: Some(Color::WHITE),
                border: None,
            },
        });
        LaidOutDocument {
            metadata: Metadata::with_title("Deck"),
            canvas: CanvasSize::widescreen(),
            pages: vec![page],
        }
    }

    #[test]
    fn test_memory_sink_roundtrip() {
        let original = doc();
        let mut sink = MemorySink::new();
        emit(&original, &Theme::default(), &mut sink).unwrap();

        assert!(sink.is_finished());
        assert_eq!(sink.into_document(), Some(original));
    }

    #[test]
    fn test_memory_sink_rejects_stray_draw() {
        let mut sink = MemorySink::new();
        let block = &doc().pages[0].elements[0];
        assert!(sink.draw(1, block).is_err());
    }

    #[test]
    fn test_unfinished_memory_sink() {
        let sink = MemorySink::new();
        assert!(sink.into_document().is_none());
    }

    #[test]
    fn test_persist_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        persist_atomically(&path, b"{}").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        // no temp files left next to the artifact
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_persist_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.json");
        let err = persist_atomically(&path, b"{}").unwrap_err();
        assert!(matches!(err, Error::SinkWriteFailure(_)));
        assert!(!path.exists());
    }
}
