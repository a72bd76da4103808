//! Placed geometry and draw primitives.
//!
//! This is the frozen output of layout: exactly what goes where on each page,
//! with every style resolved. Output sinks consume it without consulting the
//! theme again.

use crate::model::{
    Alignment, BlockKind, CanvasSize, Color, DiagramFit, Metadata, StyledTable, TextStyle,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An axis-aligned rectangle, origin at the top-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Geometry {
    /// Create a rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if two rectangles share interior area. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Geometry) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Geometry {
        Geometry::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }
}

/// Result of placing one block: its region, an optional caption region, and
/// the advanced cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Region of the block itself
    pub geometry: Geometry,
    /// Caption region inside the block's reservation
    pub caption: Option<Geometry>,
    /// Cursor for the next block on the same page
    pub cursor: f32,
}

/// A bullet marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Glyph drawn before the text
    pub glyph: char,
    /// Glyph color
    pub color: Color,
}

/// One styled paragraph of a text primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledParagraph {
    /// Paragraph text
    pub text: String,
    /// Text style
    pub style: TextStyle,
    /// Left indent in points
    pub indent: f32,
    /// Space after the paragraph in points
    pub space_after: f32,
    /// Bullet marker, for list items
    pub marker: Option<Marker>,
}

impl StyledParagraph {
    /// Create an unindented paragraph.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            indent: 0.0,
            space_after: 0.0,
            marker: None,
        }
    }
}

/// Abstract draw instruction understood by every output sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled and/or stroked box
    Rect {
        /// Fill color
        fill: Option<Color>,
        /// Stroke color
        border: Option<Color>,
    },

    /// Styled text frame
    Text {
        /// Paragraphs in order
        paragraphs: Vec<StyledParagraph>,
        /// Horizontal alignment
        alignment: Alignment,
        /// Whether the sink should wrap long lines
        wrap: bool,
    },

    /// Styled table
    Table(StyledTable),

    /// Raster image
    Image {
        /// Image file
        path: PathBuf,
        /// Declared pixel width
        source_width: u32,
        /// Declared pixel height
        source_height: u32,
        /// Fit mode used to compute the geometry
        fit: DiagramFit,
        /// Frame color
        border: Option<Color>,
    },
}

impl Primitive {
    /// Plain text carried by this primitive, if any.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Primitive::Text { paragraphs, .. } => Some(
                paragraphs
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Primitive::Table(table) => Some(table.plain_text()),
            _ => None,
        }
    }
}

/// A block after layout and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Kind of the source block
    pub kind: BlockKind,
    /// Region on the canvas
    pub geometry: Geometry,
    /// What to draw there
    pub primitive: Primitive,
}

/// A fully placed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Placed blocks in declaration order
    pub elements: Vec<PlacedBlock>,
}

impl PlacedPage {
    /// Create an empty placed page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Get the number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.elements.len()
    }

    /// Placed blocks of one kind.
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &PlacedBlock> {
        self.elements.iter().filter(move |b| b.kind == kind)
    }

    /// Plain text of the page, one block per paragraph.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|b| b.primitive.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A whole document after layout, ready for an output sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    /// Document metadata
    pub metadata: Metadata,
    /// Canvas shared by all pages
    pub canvas: CanvasSize,
    /// Pages in declaration order
    pub pages: Vec<PlacedPage>,
}

impl LaidOutDocument {
    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PlacedPage> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_edges() {
        let g = Geometry::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(g.right(), 40.0);
        assert_eq!(g.bottom(), 60.0);
        assert!(!g.is_empty());
        assert!(Geometry::new(0.0, 0.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_geometry_overlap() {
        let a = Geometry::new(0.0, 0.0, 100.0, 50.0);
        let touching = Geometry::new(0.0, 50.0, 100.0, 50.0);
        let crossing = Geometry::new(50.0, 25.0, 100.0, 50.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    #[test]
    fn test_geometry_inset() {
        let g = Geometry::new(0.0, 0.0, 100.0, 50.0).inset(8.0);
        assert_eq!(g, Geometry::new(8.0, 8.0, 84.0, 34.0));
        assert!(Geometry::new(0.0, 0.0, 100.0, 50.0).contains(&g));
    }
}
