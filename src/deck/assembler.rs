//! Document assembly.

use super::spec::{BlockSpec, DeckSpec, PageSpec};
use crate::config::{stringify, ConfigTree, Interpolator};
use crate::error::{Error, Result};
use crate::layout::{LaidOutDocument, LayoutEngine, LayoutOptions, PageComposer};
use crate::model::{
    BlockKind, BulletItem, ContentBlock, Diagram, Metadata, Page, TableModel, Theme,
};
use crate::render::{emit, BuildStats, DiagramRenderer, OutputSink};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Options for assembling a deck.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Fail when a diagram image does not exist
    pub verify_images: bool,

    /// Directory relative image and source paths resolve against
    pub base_dir: Option<PathBuf>,

    /// Fixed generation timestamp (current time when absent)
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            verify_images: true,
            base_dir: None,
            timestamp: None,
        }
    }
}

impl AssembleOptions {
    /// Create new assemble options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable image verification.
    pub fn with_verify_images(mut self, verify: bool) -> Self {
        self.verify_images = verify;
        self
    }

    /// Set the base directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Pin the generation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Expands a declarative deck into placed pages and drives an output sink.
///
/// The assembler owns the theme; every engine and composer borrows it. All
/// pages are laid out before the sink sees anything, so a failing page
/// never leaves a partial artifact behind.
pub struct DocumentAssembler {
    theme: Theme,
    layout: LayoutOptions,
    options: AssembleOptions,
    interpolator: Interpolator,
    renderer: Option<Box<dyn DiagramRenderer>>,
}

impl std::fmt::Debug for DocumentAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler")
            .field("theme", &self.theme)
            .field("layout", &self.layout)
            .field("options", &self.options)
            .field("interpolator", &self.interpolator)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl DocumentAssembler {
    /// Create an assembler with an explicit theme and layout.
    pub fn new(theme: Theme, layout: LayoutOptions) -> Self {
        Self {
            theme,
            layout,
            options: AssembleOptions::default(),
            interpolator: Interpolator::default(),
            renderer: None,
        }
    }

    /// Create an assembler configured by a deck's theme, canvas, and fallback.
    pub fn from_deck(deck: &DeckSpec) -> Self {
        let mut layout = LayoutOptions::default();
        if let Some(canvas) = deck.canvas {
            layout = layout.with_canvas(canvas);
        }
        let theme = deck.theme.clone().unwrap_or_default();
        Self::new(theme, layout).with_fallback(deck.default_fallback.clone())
    }

    /// Set the fallback for placeholders that do not name one.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.interpolator = Interpolator::new(fallback);
        self
    }

    /// Set assemble options.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Render diagram sources through `renderer`.
    pub fn with_renderer(self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.with_boxed_renderer(Box::new(renderer))
    }

    pub(crate) fn with_boxed_renderer(mut self, renderer: Box<dyn DiagramRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// The document theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The layout metrics.
    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout
    }

    /// The assemble options.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Lay out every page of `deck` without touching a sink.
    pub fn layout(
        &self,
        deck: &DeckSpec,
        config: &ConfigTree,
    ) -> Result<(LaidOutDocument, BuildStats)> {
        if deck.pages.is_empty() {
            return Err(Error::InvalidDeck("deck declares no pages".to_string()));
        }
        self.theme.validate(self.layout.canvas)?;

        let mut stats = BuildStats::new();
        let metadata = self.expand_metadata(&deck.metadata, deck.page_count(), config, &mut stats);

        let engine = LayoutEngine::new(&self.layout, &self.theme);
        let composer = PageComposer::new(engine);
        let mut pages = Vec::with_capacity(deck.pages.len());
        for (index, spec) in deck.pages.iter().enumerate() {
            let number = index as u32 + 1;
            let page = self.expand_page(spec, config, &mut stats)?;
            if let Some(ref title) = page.title {
                log::debug!("Page {}: '{}'", number, title);
            }
            let placed = composer.compose(number, page)?;
            stats.add_page();
            pages.push(placed);
        }

        log::info!(
            "Laid out {} page(s), {} block(s), {} fallback(s)",
            stats.page_count,
            stats.block_count(),
            stats.fallbacks_used
        );
        let doc = LaidOutDocument {
            metadata,
            canvas: self.layout.canvas,
            pages,
        };
        Ok((doc, stats))
    }

    /// Lay out `deck` and hand every placed block to `sink`.
    ///
    /// The sink is only driven once the whole deck laid out cleanly.
    pub fn assemble<S: OutputSink + ?Sized>(
        &self,
        deck: &DeckSpec,
        config: &ConfigTree,
        sink: &mut S,
    ) -> Result<BuildStats> {
        let (doc, stats) = self.layout(deck, config)?;
        emit(&doc, &self.theme, sink)?;
        log::info!("Assembled {} page(s)", doc.page_count());
        Ok(stats)
    }

    /// Turn one declared page into concrete blocks, resolving placeholders.
    pub fn expand_page(
        &self,
        spec: &PageSpec,
        config: &ConfigTree,
        stats: &mut BuildStats,
    ) -> Result<Page> {
        let mut page = Page::new();
        if let Some(ref title) = spec.title {
            page.title = Some(self.interpolate(title, config, stats));
            stats.add_block(BlockKind::Title);
        }
        for block in &spec.blocks {
            let block = self.expand_block(block, config, stats)?;
            stats.add_block(block.kind());
            page.add_block(block);
        }
        Ok(page)
    }

    fn expand_block(
        &self,
        spec: &BlockSpec,
        config: &ConfigTree,
        stats: &mut BuildStats,
    ) -> Result<ContentBlock> {
        let block = match spec {
            BlockSpec::Title { text, anchor, .. } => ContentBlock::Title {
                text: self.interpolate(text, config, stats),
                anchor: *anchor,
                format: spec.text_format().unwrap_or_default(),
            },
            BlockSpec::Subtitle {
                text, anchor, role, ..
            } => ContentBlock::Subtitle {
                text: self.interpolate(text, config, stats),
                anchor: *anchor,
                role: *role,
                format: spec.text_format().unwrap_or_default(),
            },
            BlockSpec::Bullets { items, offset } => {
                stats.add_bullet_items(items.len());
                ContentBlock::BulletList {
                    items: items
                        .iter()
                        .map(|item| {
                            BulletItem::new(self.interpolate(item.text(), config, stats))
                                .level(item.level())
                        })
                        .collect(),
                    offset: *offset,
                }
            }
            BlockSpec::Code { code, kind, offset } => ContentBlock::CodeBlock {
                code: self.interpolate(code, config, stats),
                kind: *kind,
                offset: *offset,
            },
            BlockSpec::Table {
                headers,
                rows,
                column_widths,
                alignments,
                offset,
            } => {
                let headers: Vec<String> = headers
                    .iter()
                    .map(|h| self.interpolate(h, config, stats))
                    .collect();
                let rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| self.interpolate(&stringify(cell), config, stats))
                            .collect()
                    })
                    .collect();
                let mut table = TableModel::new(headers, rows)?;
                if let Some(widths) = column_widths {
                    table = table.with_column_widths(widths.clone())?;
                }
                if let Some(alignments) = alignments {
                    table = table.with_alignments(alignments.clone())?;
                }
                ContentBlock::Table {
                    table,
                    offset: *offset,
                }
            }
            BlockSpec::Diagram {
                image,
                source,
                caption,
                width,
                height,
                fit,
                offset,
            } => {
                let image = self.diagram_image(image.as_deref(), source.as_deref())?;
                let mut diagram = Diagram::new(image, *width, *height).with_fit(*fit);
                if let Some(caption) = caption {
                    diagram = diagram.with_caption(self.interpolate(caption, config, stats));
                }
                ContentBlock::DiagramWithCaption {
                    diagram,
                    offset: *offset,
                }
            }
        };
        Ok(block)
    }

    fn diagram_image(&self, image: Option<&Path>, source: Option<&Path>) -> Result<PathBuf> {
        let image = match (image, source) {
            (Some(image), _) => self.resolve_path(image),
            (None, Some(source)) => {
                let renderer = self.renderer.as_ref().ok_or_else(|| {
                    Error::RendererFailure(format!(
                        "no diagram renderer configured for {}",
                        source.display()
                    ))
                })?;
                renderer.render(&self.resolve_path(source))?
            }
            (None, None) => {
                return Err(Error::InvalidDeck(
                    "diagram block needs an image or a source".to_string(),
                ))
            }
        };

        if self.options.verify_images && !image.is_file() {
            return Err(Error::RendererFailure(format!(
                "diagram image not found: {}",
                image.display()
            )));
        }
        Ok(image)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match self.options.base_dir {
            Some(ref base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn expand_metadata(
        &self,
        metadata: &Metadata,
        page_count: usize,
        config: &ConfigTree,
        stats: &mut BuildStats,
    ) -> Metadata {
        let mut expand = |field: &Option<String>| {
            field
                .as_ref()
                .map(|text| self.interpolate(text, config, stats))
        };
        Metadata {
            title: expand(&metadata.title),
            subtitle: expand(&metadata.subtitle),
            author: expand(&metadata.author),
            generated_at: Some(
                self.options
                    .timestamp
                    .or(metadata.generated_at)
                    .unwrap_or_else(Utc::now),
            ),
            page_count: page_count as u32,
        }
    }

    fn interpolate(&self, text: &str, config: &ConfigTree, stats: &mut BuildStats) -> String {
        if !self.interpolator.has_placeholders(text) {
            return text.to_string();
        }
        let rendered = self.interpolator.render(text, config);
        stats.add_bindings(rendered.resolved, rendered.fallbacks);
        rendered.text
    }
}
