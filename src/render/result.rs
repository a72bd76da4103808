//! Build statistics.

use crate::model::BlockKind;
use serde::{Deserialize, Serialize};

/// Statistics collected while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Total number of pages placed
    pub page_count: u32,

    /// Number of titles
    pub title_count: u32,

    /// Number of subtitles
    pub subtitle_count: u32,

    /// Number of bullet lists
    pub bullet_list_count: u32,

    /// Number of bullet items across all lists
    pub bullet_item_count: u32,

    /// Number of code and console blocks
    pub code_block_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of diagrams
    pub diagram_count: u32,

    /// Config placeholders that resolved
    pub bindings_resolved: u32,

    /// Config placeholders that fell back
    pub fallbacks_used: u32,
}

impl BuildStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.page_count += 1;
    }

    /// Count one block of the given kind.
    pub fn add_block(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Title => self.title_count += 1,
            BlockKind::Subtitle => self.subtitle_count += 1,
            BlockKind::CodeBlock => self.code_block_count += 1,
            BlockKind::Table => self.table_count += 1,
            BlockKind::Diagram => self.diagram_count += 1,
            BlockKind::BulletList => self.bullet_list_count += 1,
            BlockKind::Caption => {}
        }
    }

    /// Add bullet items.
    pub fn add_bullet_items(&mut self, count: usize) {
        self.bullet_item_count += count as u32;
    }

    /// Record placeholder substitutions.
    pub fn add_bindings(&mut self, resolved: u32, fallbacks: u32) {
        self.bindings_resolved += resolved;
        self.fallbacks_used += fallbacks;
    }

    /// Total number of content blocks counted.
    pub fn block_count(&self) -> u32 {
        self.title_count
            + self.subtitle_count
            + self.bullet_list_count
            + self.code_block_count
            + self.table_count
            + self.diagram_count
    }
}
