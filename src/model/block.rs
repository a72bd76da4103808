//! Content block types.

use super::{Alignment, Color, Role, TableModel, TextStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Deepest bullet indent level.
pub const MAX_BULLET_LEVEL: u8 = 2;

/// Explicit top-left position for anchored blocks, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Distance from the left canvas edge
    pub x: Option<f32>,
    /// Distance from the top canvas edge
    pub y: f32,
}

impl Anchor {
    /// Anchor at a vertical offset, keeping the default left margin.
    pub fn top(y: f32) -> Self {
        Self { x: None, y }
    }

    /// Anchor at an explicit point.
    pub fn at(x: f32, y: f32) -> Self {
        Self { x: Some(x), y }
    }
}

/// Per-block overrides on a title or subtitle.
///
/// Cover pages center their lines, set a line in italics, or give a heading
/// its own ink. Everything else follows the theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormat {
    /// Horizontal alignment inside the header region
    pub alignment: Alignment,
    /// Italic slant
    pub italic: bool,
    /// Ink replacing the role color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl TextFormat {
    /// Centered text.
    pub fn centered() -> Self {
        Self {
            alignment: Alignment::Center,
            ..Self::default()
        }
    }

    /// Set the slant.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the ink.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Apply the overrides to a resolved style.
    pub fn apply(&self, mut style: TextStyle) -> TextStyle {
        style.italic |= self.italic;
        if let Some(color) = self.color {
            style.color = color;
        }
        style
    }
}

/// One bullet list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletItem {
    /// Item text
    pub text: String,
    /// Indent level (0-2)
    pub level: u8,
}

impl BulletItem {
    /// Create a top-level item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
        }
    }

    /// Set the indent level, clamped to 0-2.
    pub fn level(mut self, level: u8) -> Self {
        self.level = level.min(MAX_BULLET_LEVEL);
        self
    }
}

/// Flavor of a code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    /// Source listing on a light background
    #[default]
    Code,
    /// Terminal session on a dark background
    Console,
}

/// How a diagram image fills its region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFit {
    /// Fill the whole region, ignoring the declared aspect ratio
    #[default]
    Stretch,
    /// Keep the declared aspect ratio, centered in the region
    Contain,
}

/// A rendered diagram plus its optional caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    /// Path to the raster image produced by the diagram renderer
    pub image: PathBuf,
    /// Caption under the image
    pub caption: Option<String>,
    /// Declared image width in pixels
    pub width: u32,
    /// Declared image height in pixels
    pub height: u32,
    /// Fit mode
    pub fit: DiagramFit,
}

impl Diagram {
    /// Create a diagram with declared pixel dimensions.
    pub fn new(image: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            image: image.into(),
            caption: None,
            width,
            height,
            fit: DiagramFit::Stretch,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the fit mode.
    pub fn with_fit(mut self, fit: DiagramFit) -> Self {
        self.fit = fit;
        self
    }
}

/// Kind tag of a block, used for statistics and sink dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Slide title
    Title,
    /// Subtitle
    Subtitle,
    /// Bullet list
    BulletList,
    /// Code or console block
    CodeBlock,
    /// Data table
    Table,
    /// Diagram image
    Diagram,
    /// Caption under a diagram
    Caption,
}

impl BlockKind {
    /// Whether blocks of this kind occupy the body region.
    pub fn is_body(self) -> bool {
        matches!(
            self,
            BlockKind::BulletList | BlockKind::CodeBlock | BlockKind::Table | BlockKind::Diagram
        )
    }
}

/// An atomic unit of slide content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Slide title, anchored near the top
    Title {
        /// Title text
        text: String,
        /// Position override
        anchor: Option<Anchor>,
        /// Alignment, slant and ink overrides
        format: TextFormat,
    },

    /// Subtitle, anchored below the title
    Subtitle {
        /// Subtitle text
        text: String,
        /// Position override
        anchor: Option<Anchor>,
        /// Text role (`Subtitle` or `Small`)
        role: Role,
        /// Alignment, slant and ink overrides
        format: TextFormat,
    },

    /// Bullet list
    BulletList {
        /// Items in order
        items: Vec<BulletItem>,
        /// Extra offset below the cursor
        offset: Option<f32>,
    },

    /// Code or console listing
    CodeBlock {
        /// Listing text, line breaks preserved
        code: String,
        /// Flavor
        kind: CodeKind,
        /// Extra offset below the cursor
        offset: Option<f32>,
    },

    /// Data table
    Table {
        /// The table
        table: TableModel,
        /// Extra offset below the cursor
        offset: Option<f32>,
    },

    /// Diagram image with caption
    DiagramWithCaption {
        /// The diagram
        diagram: Diagram,
        /// Extra offset below the cursor
        offset: Option<f32>,
    },
}

impl ContentBlock {
    /// Create a title block.
    pub fn title(text: impl Into<String>) -> Self {
        ContentBlock::Title {
            text: text.into(),
            anchor: None,
            format: TextFormat::default(),
        }
    }

    /// Create a subtitle block.
    pub fn subtitle(text: impl Into<String>) -> Self {
        ContentBlock::Subtitle {
            text: text.into(),
            anchor: None,
            role: Role::Subtitle,
            format: TextFormat::default(),
        }
    }

    /// Create a subtitle block with an explicit role.
    pub fn subtitle_as(text: impl Into<String>, role: Role) -> Self {
        ContentBlock::Subtitle {
            text: text.into(),
            anchor: None,
            role,
            format: TextFormat::default(),
        }
    }

    /// Create a bullet list from top-level items.
    pub fn bullets<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        ContentBlock::BulletList {
            items: items.into_iter().map(BulletItem::new).collect(),
            offset: None,
        }
    }

    /// Create a code block.
    pub fn code(code: impl Into<String>, kind: CodeKind) -> Self {
        ContentBlock::CodeBlock {
            code: code.into(),
            kind,
            offset: None,
        }
    }

    /// Create a table block.
    pub fn table(table: TableModel) -> Self {
        ContentBlock::Table {
            table,
            offset: None,
        }
    }

    /// Create a diagram block.
    pub fn diagram(diagram: Diagram) -> Self {
        ContentBlock::DiagramWithCaption {
            diagram,
            offset: None,
        }
    }

    /// Set the anchor on a title or subtitle; ignored for body blocks.
    pub fn anchored(mut self, at: Anchor) -> Self {
        match &mut self {
            ContentBlock::Title { anchor, .. } | ContentBlock::Subtitle { anchor, .. } => {
                *anchor = Some(at);
            }
            _ => {}
        }
        self
    }

    /// Set the text format on a title or subtitle; ignored for body blocks.
    pub fn formatted(mut self, with: TextFormat) -> Self {
        match &mut self {
            ContentBlock::Title { format, .. } | ContentBlock::Subtitle { format, .. } => {
                *format = with;
            }
            _ => {}
        }
        self
    }

    /// Set the vertical offset hint on a body block; ignored for anchored blocks.
    pub fn offset_by(mut self, dy: f32) -> Self {
        match &mut self {
            ContentBlock::BulletList { offset, .. }
            | ContentBlock::CodeBlock { offset, .. }
            | ContentBlock::Table { offset, .. }
            | ContentBlock::DiagramWithCaption { offset, .. } => *offset = Some(dy),
            _ => {}
        }
        self
    }

    /// Get the kind tag.
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Title { .. } => BlockKind::Title,
            ContentBlock::Subtitle { .. } => BlockKind::Subtitle,
            ContentBlock::BulletList { .. } => BlockKind::BulletList,
            ContentBlock::CodeBlock { .. } => BlockKind::CodeBlock,
            ContentBlock::Table { .. } => BlockKind::Table,
            ContentBlock::DiagramWithCaption { .. } => BlockKind::Diagram,
        }
    }

    /// Check if this block occupies the body region.
    pub fn is_body(&self) -> bool {
        self.kind().is_body()
    }

    /// Anchor override, for titles and subtitles.
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            ContentBlock::Title { anchor, .. } | ContentBlock::Subtitle { anchor, .. } => *anchor,
            _ => None,
        }
    }

    /// Vertical offset hint, for body blocks.
    pub fn offset(&self) -> Option<f32> {
        match self {
            ContentBlock::BulletList { offset, .. }
            | ContentBlock::CodeBlock { offset, .. }
            | ContentBlock::Table { offset, .. }
            | ContentBlock::DiagramWithCaption { offset, .. } => *offset,
            _ => None,
        }
    }

    /// Caption declared by a diagram block.
    pub fn caption(&self) -> Option<&str> {
        match self {
            ContentBlock::DiagramWithCaption { diagram, .. } => diagram.caption.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_level_clamped() {
        assert_eq!(BulletItem::new("a").level(1).level, 1);
        assert_eq!(BulletItem::new("a").level(7).level, MAX_BULLET_LEVEL);
    }

    #[test]
    fn test_block_kinds() {
        assert_eq!(ContentBlock::title("T").kind(), BlockKind::Title);
        assert!(!ContentBlock::subtitle("S").is_body());
        assert!(ContentBlock::bullets(["a", "b"]).is_body());
        assert!(ContentBlock::code("ls", CodeKind::Console).is_body());
        assert!(!BlockKind::Caption.is_body());
    }

    #[test]
    fn test_anchor_only_on_headers() {
        let title = ContentBlock::title("T").anchored(Anchor::top(10.0));
        assert_eq!(title.anchor(), Some(Anchor::top(10.0)));

        let list = ContentBlock::bullets(["a"]).anchored(Anchor::top(10.0));
        assert_eq!(list.anchor(), None);
    }

    #[test]
    fn test_offset_only_on_body() {
        let list = ContentBlock::bullets(["a"]).offset_by(12.0);
        assert_eq!(list.offset(), Some(12.0));

        let title = ContentBlock::title("T").offset_by(12.0);
        assert_eq!(title.offset(), None);
    }

    #[test]
    fn test_format_only_on_headers() {
        let title = ContentBlock::title("T").formatted(TextFormat::centered());
        assert!(matches!(
            title,
            ContentBlock::Title { format, .. } if format.alignment == Alignment::Center
        ));
        let list = ContentBlock::bullets(["a"]);
        assert_eq!(list.clone().formatted(TextFormat::centered()), list);
    }

    #[test]
    fn test_format_apply() {
        let theme = crate::model::Theme::default();
        let green = Color::rgb(0x1A, 0x6B, 0x3C);
        let format = TextFormat::centered().italic(true).with_color(green);
        let style = format.apply(theme.resolve(Role::Small));
        assert!(style.italic);
        assert_eq!(style.color, green);
        assert_eq!(style.size, theme.small_size);

        let plain = TextFormat::default().apply(theme.resolve(Role::Title));
        assert_eq!(plain, theme.resolve(Role::Title));
    }

    #[test]
    fn test_format_deserialize_partial() {
        let format: TextFormat = serde_json::from_str(r#"{"alignment": "center"}"#).unwrap();
        assert_eq!(format, TextFormat::centered());
    }

    #[test]
    fn test_diagram_caption() {
        let block = ContentBlock::diagram(
            Diagram::new("deployment.png", 1600, 900).with_caption("Deployment"),
        );
        assert_eq!(block.caption(), Some("Deployment"));
        assert_eq!(ContentBlock::title("T").caption(), None);
    }
}
