//! Page composition.

use super::placed::{Placement, PlacedPage};
use super::LayoutEngine;
use crate::error::{Error, Result};
use crate::model::{ContentBlock, Page};

/// Places the blocks of one page at a time.
///
/// Each page starts from a fresh cursor. Content is never reflowed onto a
/// following page; a page holds at most one body block below its header.
#[derive(Debug, Clone, Copy)]
pub struct PageComposer<'a> {
    engine: LayoutEngine<'a>,
}

impl<'a> PageComposer<'a> {
    /// Create a composer around an engine.
    pub fn new(engine: LayoutEngine<'a>) -> Self {
        Self { engine }
    }

    /// The engine used for placement.
    pub fn engine(&self) -> &LayoutEngine<'a> {
        &self.engine
    }

    /// Place every block of `page` and style it.
    ///
    /// Headers are measured before the body so that a body block declared
    /// ahead of a subtitle still lands below it. Output keeps declaration
    /// order.
    pub fn compose(&self, number: u32, page: Page) -> Result<PlacedPage> {
        validate(number, &page)?;

        let blocks = page.into_blocks();
        let header_floor = blocks
            .iter()
            .filter(|b| !b.is_body())
            .fold(self.engine.initial_cursor(), |cursor, block| {
                self.engine.place(block, cursor).cursor
            });

        let mut placed = PlacedPage::new(number);
        let mut regions = Vec::with_capacity(blocks.len());
        let mut cursor = header_floor;
        for block in blocks {
            let kind = block.kind();
            let placement: Placement = self.engine.place(&block, cursor);
            if placement.geometry.is_empty() {
                return Err(Error::Layout(format!(
                    "page {}: no room left for {:?} at y={:.1}",
                    number, kind, placement.geometry.y
                )));
            }
            for (other_kind, other) in &regions {
                if placement.geometry.overlaps(other) {
                    log::warn!(
                        "Page {}: {:?} overlaps {:?} at y={:.1}",
                        number,
                        kind,
                        other_kind,
                        placement.geometry.y
                    );
                }
            }
            log::debug!(
                "Page {}: placed {:?} at ({:.1}, {:.1}) {:.1}x{:.1}",
                number,
                kind,
                placement.geometry.x,
                placement.geometry.y,
                placement.geometry.width,
                placement.geometry.height
            );
            regions.push((kind, placement.geometry));
            placed.elements.extend(self.engine.style(block, &placement));
            cursor = placement.cursor;
        }
        Ok(placed)
    }
}

fn validate(number: u32, page: &Page) -> Result<()> {
    let bodies: Vec<_> = page.blocks.iter().filter(|b| b.is_body()).collect();
    if bodies.len() > 1 {
        return Err(Error::Layout(format!(
            "page {}: {} body blocks declared ({:?} and {:?}); split them across pages",
            number,
            bodies.len(),
            bodies[0].kind(),
            bodies[1].kind()
        )));
    }
    let unanchored_titles = usize::from(page.title.is_some())
        + page
            .blocks
            .iter()
            .filter(|b| matches!(b, ContentBlock::Title { anchor: None, .. }))
            .count();
    if unanchored_titles > 1 {
        return Err(Error::Layout(format!(
            "page {}: {} titles share the default title anchor",
            number, unanchored_titles
        )));
    }
    Ok(())
}
