//! Block placement and styling.
//!
//! The engine is a pure function of its inputs: the same canvas, theme,
//! block and cursor always produce the same geometry. It keeps no state
//! between calls.

use super::placed::{Geometry, Marker, Placement, PlacedBlock, Primitive, StyledParagraph};
use super::LayoutOptions;
use crate::model::{
    Alignment, Anchor, BlockKind, BulletItem, CodeKind, Color, ContentBlock, Diagram, DiagramFit,
    Role, TextFormat, Theme, CODE_FILL,
};

/// Bullet glyphs by indent level.
const BULLET_GLYPHS: [char; 3] = ['•', '–', '◦'];

/// Places blocks on a fixed canvas and resolves their styles.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    options: &'a LayoutOptions,
    theme: &'a Theme,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine over shared options and theme.
    pub fn new(options: &'a LayoutOptions, theme: &'a Theme) -> Self {
        Self { options, theme }
    }

    /// The layout options.
    pub fn options(&self) -> &'a LayoutOptions {
        self.options
    }

    /// The theme.
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    /// Canvas width minus both side margins.
    pub fn content_width(&self) -> f32 {
        (self.options.canvas.width - 2.0 * self.theme.margin).max(0.0)
    }

    /// Lowest y a body block may extend to.
    pub fn content_floor(&self) -> f32 {
        self.options.canvas.height - self.theme.margin
    }

    /// Cursor at the start of every page.
    pub fn initial_cursor(&self) -> f32 {
        self.theme.margin
    }

    /// Compute the region of `block` given the current cursor.
    ///
    /// Titles and subtitles sit at fixed anchors and only push the cursor
    /// below themselves. Body blocks span the content width from the cursor
    /// down to the bottom margin, less a caption reservation when they
    /// declare a caption.
    pub fn place(&self, block: &ContentBlock, cursor: f32) -> Placement {
        match block {
            ContentBlock::Title { anchor, .. } => self.place_anchored(
                *anchor,
                self.options.title_top,
                self.options.title_height,
                cursor,
            ),
            ContentBlock::Subtitle { anchor, .. } => self.place_anchored(
                *anchor,
                self.options.subtitle_top,
                self.options.subtitle_height,
                cursor,
            ),
            _ => self.place_body(block.offset(), block.caption().is_some(), cursor),
        }
    }

    fn place_anchored(
        &self,
        anchor: Option<Anchor>,
        default_top: f32,
        height: f32,
        cursor: f32,
    ) -> Placement {
        let margin = self.theme.margin;
        let (x, y) = match anchor {
            Some(a) => (a.x.unwrap_or(margin), a.y),
            None => (margin, default_top),
        };
        let width = (self.options.canvas.width - margin - x).max(0.0);
        let geometry = Geometry::new(x, y, width, height);
        Placement {
            geometry,
            caption: None,
            cursor: cursor.max(geometry.bottom() + self.options.header_gap),
        }
    }

    fn place_body(&self, offset: Option<f32>, has_caption: bool, cursor: f32) -> Placement {
        let margin = self.theme.margin;
        let width = self.content_width();
        let floor = self.content_floor();
        let top = cursor + offset.unwrap_or(0.0);
        let reserve = if has_caption {
            self.options.caption_reserve
        } else {
            0.0
        };
        let height = (floor - reserve - top).max(0.0);
        let caption = has_caption.then(|| {
            let h = self.options.caption_height;
            Geometry::new(margin, floor - h, width, h)
        });
        Placement {
            geometry: Geometry::new(margin, top, width, height),
            caption,
            cursor: floor,
        }
    }

    /// Turn a placed block into draw primitives.
    ///
    /// Consumes the block; only the primitives outlive the layout pass.
    pub fn style(&self, block: ContentBlock, placement: &Placement) -> Vec<PlacedBlock> {
        let region = placement.geometry;
        match block {
            ContentBlock::Title { text, format, .. } => {
                vec![self.header_block(BlockKind::Title, region, text, Role::Title, format)]
            }
            ContentBlock::Subtitle {
                text, role, format, ..
            } => vec![self.header_block(BlockKind::Subtitle, region, text, role, format)],
            ContentBlock::BulletList { items, .. } => vec![PlacedBlock {
                kind: BlockKind::BulletList,
                geometry: region,
                primitive: Primitive::Text {
                    paragraphs: items.into_iter().map(|item| self.bullet(item)).collect(),
                    alignment: Alignment::Left,
                    wrap: true,
                },
            }],
            ContentBlock::CodeBlock { code, kind, .. } => self.code_block(region, &code, kind),
            ContentBlock::Table { table, .. } => vec![PlacedBlock {
                kind: BlockKind::Table,
                geometry: region,
                primitive: Primitive::Table(table.styled(self.theme, region.width)),
            }],
            ContentBlock::DiagramWithCaption { diagram, .. } => {
                self.diagram(region, placement.caption, diagram)
            }
        }
    }

    fn header_block(
        &self,
        kind: BlockKind,
        region: Geometry,
        text: String,
        role: Role,
        format: TextFormat,
    ) -> PlacedBlock {
        PlacedBlock {
            kind,
            geometry: region,
            primitive: Primitive::Text {
                paragraphs: vec![StyledParagraph::new(
                    text,
                    format.apply(self.theme.resolve(role)),
                )],
                alignment: format.alignment,
                wrap: true,
            },
        }
    }

    fn bullet(&self, item: BulletItem) -> StyledParagraph {
        let level = usize::from(item.level).min(BULLET_GLYPHS.len() - 1);
        StyledParagraph {
            text: item.text,
            style: self.theme.resolve(Role::Body),
            indent: level as f32 * self.options.bullet_indent,
            space_after: self.options.bullet_spacing,
            marker: Some(Marker {
                glyph: BULLET_GLYPHS[level],
                color: self.theme.secondary,
            }),
        }
    }

    fn code_block(&self, region: Geometry, code: &str, kind: CodeKind) -> Vec<PlacedBlock> {
        let mut style = self.theme.resolve(Role::Code);
        let fill = match kind {
            CodeKind::Code => CODE_FILL,
            CodeKind::Console => {
                style.color = Color::SLATE_200;
                self.theme.primary
            }
        };
        let paragraphs = code
            .lines()
            .map(|line| StyledParagraph::new(line, style.clone()))
            .collect();
        vec![
            PlacedBlock {
                kind: BlockKind::CodeBlock,
                geometry: region,
                primitive: Primitive::Rect {
                    fill: Some(fill),
                    border: None,
                },
            },
            PlacedBlock {
                kind: BlockKind::CodeBlock,
                geometry: region.inset(self.options.code_padding),
                primitive: Primitive::Text {
                    paragraphs,
                    alignment: Alignment::Left,
                    wrap: false,
                },
            },
        ]
    }

    fn diagram(
        &self,
        region: Geometry,
        caption_region: Option<Geometry>,
        diagram: Diagram,
    ) -> Vec<PlacedBlock> {
        let mut placed = vec![PlacedBlock {
            kind: BlockKind::Diagram,
            geometry: fit_image(region, diagram.width, diagram.height, diagram.fit),
            primitive: Primitive::Image {
                path: diagram.image,
                source_width: diagram.width,
                source_height: diagram.height,
                fit: diagram.fit,
                border: Some(Color::SLATE_200),
            },
        }];
        if let (Some(text), Some(area)) = (diagram.caption, caption_region) {
            placed.push(self.header_block(
                BlockKind::Caption,
                area,
                text,
                Role::Small,
                TextFormat::default(),
            ));
        }
        placed
    }
}

/// Geometry of an image inside `region`.
///
/// `Stretch` fills the region. `Contain` keeps the declared aspect ratio and
/// centers the image; zero declared dimensions fall back to `Stretch`.
pub fn fit_image(region: Geometry, width: u32, height: u32, fit: DiagramFit) -> Geometry {
    if fit == DiagramFit::Stretch || width == 0 || height == 0 {
        return region;
    }
    let scale = (region.width / width as f32).min(region.height / height as f32);
    let w = width as f32 * scale;
    let h = height as f32 * scale;
    Geometry::new(
        region.x + (region.width - w) / 2.0,
        region.y + (region.height - h) / 2.0,
        w,
        h,
    )
}
