//! Document model types.
//!
//! This module defines the authored side of a document: the theme, the
//! content block variants, tables, and pages. Placed geometry lives in
//! [`crate::layout`].

mod block;
mod document;
mod page;
mod table;
mod theme;

pub use block::{
    Anchor, BlockKind, BulletItem, CodeKind, ContentBlock, Diagram, DiagramFit, TextFormat,
    MAX_BULLET_LEVEL,
};
pub use document::{CanvasSize, Metadata};
pub use page::Page;
pub use table::{Alignment, RowShade, StyledCell, StyledTable, TableModel};
pub use theme::{
    Color, Role, TextStyle, Theme, CODE_FILL, TABLE_ALT_FILL, TABLE_CELL_BORDER,
    TABLE_HEADER_BORDER, TABLE_HEADER_FILL, TABLE_HEADER_INK, TABLE_PLAIN_FILL,
};
