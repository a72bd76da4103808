//! # deckwright
//!
//! Slide deck layout and styling engine.
//!
//! A deck is a declarative list of pages built from a few block types:
//! titles, subtitles, bullet lists, code and console listings, tables, and
//! captioned diagrams. Deckwright places every block on a fixed canvas,
//! styles it from a single theme, substitutes live configuration values into
//! its text, and hands the result to an output sink.
//!
//! ## Quick Start
//!
//! ```no_run
//! use deckwright::{build_file, render::SinkOptions};
//!
//! fn main() -> deckwright::Result<()> {
//!     let stats = build_file(
//!         "docs/deck.json",
//!         Some("config/tracker.json"),
//!         SinkOptions::new().with_output("build/deck.json"),
//!     )?;
//!     println!("Pages: {}", stats.page_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic layout**: same deck, theme, and config give the same geometry
//! - **Config binding**: `{{dotted.path|fallback}}` placeholders in any text
//! - **Validated tables**: ragged rows are rejected before anything is written
//! - **All-or-nothing output**: sinks persist through a temp file on success only

pub mod config;
pub mod deck;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use config::{ConfigBinding, ConfigTree, Interpolator};
pub use deck::{AssembleOptions, BlockSpec, DeckSpec, DocumentAssembler, PageSpec};
pub use error::{Error, Result};
pub use layout::{
    Geometry, LaidOutDocument, LayoutEngine, LayoutOptions, PageComposer, PlacedBlock, PlacedPage,
};
pub use model::{
    Alignment, Anchor, BulletItem, CanvasSize, CodeKind, Color, ContentBlock, Diagram, DiagramFit,
    Metadata, Page, Role, TableModel, TextFormat, TextStyle, Theme,
};
pub use render::{
    BuildStats, DiagramRenderer, GraphvizRenderer, JsonFormat, OutputFormat, OutputSink,
    SinkOptions,
};

use std::path::{Path, PathBuf};

/// Load a deck description from a JSON file.
///
/// # Example
///
/// ```no_run
/// use deckwright::load_deck;
///
/// let deck = load_deck("docs/deck.json").unwrap();
/// println!("Pages: {}", deck.page_count());
/// ```
pub fn load_deck<P: AsRef<Path>>(path: P) -> Result<DeckSpec> {
    DeckSpec::from_path(path)
}

/// Load a runtime configuration tree from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigTree> {
    ConfigTree::from_path(path)
}

/// Build a deck file into an artifact.
///
/// Relative image paths in the deck resolve against the deck's directory.
/// Without a config file every placeholder falls back.
///
/// # Arguments
///
/// * `deck` - Path to the deck JSON
/// * `config` - Optional path to the runtime configuration JSON
/// * `sink` - Where and how to write the artifact
pub fn build_file<P: AsRef<Path>>(
    deck: P,
    config: Option<P>,
    sink: SinkOptions,
) -> Result<BuildStats> {
    let deck_path = deck.as_ref();
    let spec = load_deck(deck_path)?;
    let config = match config {
        Some(path) => load_config(path)?,
        None => ConfigTree::empty(),
    };

    let mut builder = Deckwright::new();
    if let Some(dir) = deck_path.parent() {
        builder = builder.with_base_dir(dir);
    }
    builder.build(&spec, &config, &sink)
}

/// Builder for assembling decks with custom settings.
///
/// Settings given here take precedence over the deck's own theme, canvas,
/// and fallback.
///
/// # Example
///
/// ```no_run
/// use deckwright::{load_deck, ConfigTree, Deckwright, Theme};
///
/// let deck = load_deck("docs/deck.json")?;
/// let (doc, stats) = Deckwright::new()
///     .with_theme(Theme::default().with_margin(36.0))
///     .with_fallback("?")
///     .verify_images(false)
///     .layout(&deck, &ConfigTree::empty())?;
/// println!("{} pages, {} fallbacks", doc.page_count(), stats.fallbacks_used);
/// # Ok::<(), deckwright::Error>(())
/// ```
#[derive(Default)]
pub struct Deckwright {
    theme: Option<Theme>,
    canvas: Option<CanvasSize>,
    fallback: Option<String>,
    options: AssembleOptions,
    renderer: Option<Box<dyn DiagramRenderer>>,
}

impl Deckwright {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the deck's theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Override the deck's canvas size.
    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Override the default placeholder fallback.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Enable or disable diagram image checks.
    pub fn verify_images(mut self, verify: bool) -> Self {
        self.options = self.options.with_verify_images(verify);
        self
    }

    /// Resolve relative diagram paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_base_dir(dir);
        self
    }

    /// Render diagram sources with `renderer`.
    pub fn with_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Create the assembler for `deck`.
    pub fn assembler(self, deck: &DeckSpec) -> DocumentAssembler {
        let mut deck_settings = DeckSpec {
            theme: self.theme.or_else(|| deck.theme.clone()),
            canvas: self.canvas.or(deck.canvas),
            default_fallback: deck.default_fallback.clone(),
            ..DeckSpec::default()
        };
        if let Some(fallback) = self.fallback {
            deck_settings.default_fallback = fallback;
        }

        let assembler = DocumentAssembler::from_deck(&deck_settings).with_options(self.options);
        match self.renderer {
            Some(renderer) => assembler.with_boxed_renderer(renderer),
            None => assembler,
        }
    }

    /// Lay out `deck` without writing anything.
    pub fn layout(
        self,
        deck: &DeckSpec,
        config: &ConfigTree,
    ) -> Result<(LaidOutDocument, BuildStats)> {
        self.assembler(deck).layout(deck, config)
    }

    /// Lay out `deck` and write the artifact `sink` describes.
    pub fn build(self, deck: &DeckSpec, config: &ConfigTree, sink: &SinkOptions) -> Result<BuildStats> {
        let mut output = sink.open()?;
        self.assembler(deck).assemble(deck, config, output.as_mut())
    }
}
