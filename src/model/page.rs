//! Page-level types.

use super::ContentBlock;

/// A single slide as authored: an optional title plus its blocks.
///
/// Pages are independent. Nothing placed on one page affects another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Title rendered before every other block
    pub title: Option<String>,

    /// Content blocks in declaration order
    pub blocks: Vec<ContentBlock>,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            blocks: Vec::new(),
        }
    }

    /// Add a block and return self.
    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    /// Check if the page has neither a title nor blocks.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.blocks.is_empty()
    }

    /// Get the number of declared blocks, counting the title.
    pub fn block_count(&self) -> usize {
        self.blocks.len() + usize::from(self.title.is_some())
    }

    /// Blocks in render order: the page title first, then the declared blocks.
    pub fn into_blocks(self) -> Vec<ContentBlock> {
        let mut blocks = Vec::with_capacity(self.blocks.len() + 1);
        if let Some(title) = self.title {
            blocks.push(ContentBlock::title(title));
        }
        blocks.extend(self.blocks);
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_page_new() {
        let page = Page::new();
        assert!(page.is_empty());
        assert_eq!(page.block_count(), 0);
    }

    #[test]
    fn test_title_comes_first() {
        let page = Page::titled("System overview")
            .with_block(ContentBlock::bullets(["Purpose", "Inputs"]));
        assert_eq!(page.block_count(), 2);

        let blocks = page.into_blocks();
        assert_eq!(blocks[0].kind(), BlockKind::Title);
        assert_eq!(blocks[1].kind(), BlockKind::BulletList);
    }
}
