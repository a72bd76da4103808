//! Theme and style resolution.

use super::CanvasSize;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Slate-900, the default primary ink.
    pub const SLATE_900: Color = Color::rgb(15, 23, 42);
    /// Slate-600, the default muted ink.
    pub const SLATE_600: Color = Color::rgb(71, 85, 105);
    /// Slate-200, used for image frames and console text.
    pub const SLATE_200: Color = Color::rgb(226, 232, 240);
    /// Sky-600, the default accent.
    pub const SKY_600: Color = Color::rgb(2, 132, 199);
    /// Deep navy used by table headers and code text.
    pub const NAVY: Color = Color::rgb(0x1B, 0x3A, 0x6B);
    /// Pure white.
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` or `RRGGBB` string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", s))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fill behind table header cells, independent of the theme.
pub const TABLE_HEADER_FILL: Color = Color::NAVY;
/// Ink for table header text, independent of the theme.
pub const TABLE_HEADER_INK: Color = Color::WHITE;
/// Border around table header cells.
pub const TABLE_HEADER_BORDER: Color = Color::WHITE;
/// Fill of even (0, 2, 4, ...) data rows.
pub const TABLE_ALT_FILL: Color = Color::rgb(0xEE, 0xF2, 0xF7);
/// Fill of odd data rows.
pub const TABLE_PLAIN_FILL: Color = Color::WHITE;
/// Border around table data cells.
pub const TABLE_CELL_BORDER: Color = Color::rgb(0xC8, 0xD6, 0xE5);
/// Background of code blocks.
pub const CODE_FILL: Color = Color::rgb(0xF0, 0xF4, 0xF8);

/// Named text role a block asks the theme to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Slide title
    Title,
    /// Subtitle under the title
    Subtitle,
    /// Body text (bullets)
    Body,
    /// Small print (captions, compact subtitles)
    Small,
    /// Table header cell
    TableHeader,
    /// Table data cell
    TableCell,
    /// Monospace code
    Code,
}

/// Resolved text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in points
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    #[serde(default)]
    pub italic: bool,
}

/// Immutable style parameters shared by every block of a document.
///
/// All lengths are in points (1/72 inch). Missing fields deserialize to the
/// defaults, so a deck can override only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Main ink for titles and body text
    pub primary: Color,
    /// Accent color (bullet markers)
    pub secondary: Color,
    /// Subdued ink for subtitles and captions
    pub muted: Color,
    /// Title font size
    pub title_size: f32,
    /// Subtitle font size
    pub subtitle_size: f32,
    /// Body font size
    pub body_size: f32,
    /// Small font size (captions, tables)
    pub small_size: f32,
    /// Code font size
    pub code_size: f32,
    /// Proportional font family
    pub font_family: String,
    /// Monospace font family
    pub mono_family: String,
    /// Page margin on every side
    pub margin: f32,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the style for a role.
    ///
    /// Table headers always resolve to white bold text; their dark fill is
    /// [`TABLE_HEADER_FILL`]. Neither depends on the theme's colors.
    pub fn resolve(&self, role: Role) -> TextStyle {
        let (size, color, bold) = match role {
            Role::Title => (self.title_size, self.primary, true),
            Role::Subtitle => (self.subtitle_size, self.muted, false),
            Role::Body => (self.body_size, self.primary, false),
            Role::Small => (self.small_size, self.muted, false),
            Role::TableHeader => (self.small_size, TABLE_HEADER_INK, true),
            Role::TableCell => (self.small_size, self.primary, false),
            Role::Code => (self.code_size, Color::NAVY, false),
        };
        let family = match role {
            Role::Code => self.mono_family.clone(),
            _ => self.font_family.clone(),
        };
        TextStyle {
            family,
            size,
            color,
            bold,
            italic: false,
        }
    }

    /// Check that the theme fits on `canvas`.
    ///
    /// Deserialized themes skip the builder clamps, so decks are checked here
    /// before anything is placed.
    pub fn validate(&self, canvas: CanvasSize) -> Result<()> {
        if !(canvas.width.is_finite() && canvas.height.is_finite())
            || canvas.width <= 0.0
            || canvas.height <= 0.0
        {
            return Err(Error::InvalidDeck(format!(
                "canvas {}x{} is not drawable",
                canvas.width, canvas.height
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidDeck(format!(
                "theme margin {} must be a non-negative length",
                self.margin
            )));
        }
        if 2.0 * self.margin >= canvas.width.min(canvas.height) {
            return Err(Error::InvalidDeck(format!(
                "theme margin {} leaves no content area on a {}x{} canvas",
                self.margin, canvas.width, canvas.height
            )));
        }
        let sizes = [
            ("title_size", self.title_size),
            ("subtitle_size", self.subtitle_size),
            ("body_size", self.body_size),
            ("small_size", self.small_size),
            ("code_size", self.code_size),
        ];
        for (name, size) in sizes {
            if !size.is_finite() || size <= 0.0 {
                return Err(Error::InvalidDeck(format!(
                    "theme {} must be positive, got {}",
                    name, size
                )));
            }
        }
        Ok(())
    }

    /// Set the primary color.
    pub fn with_primary(mut self, color: Color) -> Self {
        self.primary = color;
        self
    }

    /// Set the accent color.
    pub fn with_secondary(mut self, color: Color) -> Self {
        self.secondary = color;
        self
    }

    /// Set the muted color.
    pub fn with_muted(mut self, color: Color) -> Self {
        self.muted = color;
        self
    }

    /// Set the page margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Set title, body and small font sizes in points.
    pub fn with_sizes(mut self, title: f32, body: f32, small: f32) -> Self {
        self.title_size = title;
        self.subtitle_size = body;
        self.body_size = body;
        self.small_size = small;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::SLATE_900,
            secondary: Color::SKY_600,
            muted: Color::SLATE_600,
            title_size: 34.0,
            subtitle_size: 18.0,
            body_size: 18.0,
            small_size: 14.0,
            code_size: 12.0,
            font_family: "Calibri".to_string(),
            mono_family: "Courier New".to_string(),
            margin: 43.2, // 0.6in
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#1B3A6B"), Some(Color::NAVY));
        assert_eq!(Color::from_hex("eef2f7"), Some(TABLE_ALT_FILL));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::SKY_600.to_hex(), "#0284C7");
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, "\"#FFFFFF\"");
        let color: Color = serde_json::from_str("\"#0F172A\"").unwrap();
        assert_eq!(color, Color::SLATE_900);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn test_resolve_roles() {
        let theme = Theme::default();
        let title = theme.resolve(Role::Title);
        assert_eq!(title.size, 34.0);
        assert!(title.bold);
        assert_eq!(title.color, theme.primary);

        let caption = theme.resolve(Role::Small);
        assert_eq!(caption.color, theme.muted);
        assert!(!caption.bold);

        let code = theme.resolve(Role::Code);
        assert_eq!(code.family, "Courier New");
    }

    #[test]
    fn test_table_header_ignores_theme() {
        let loud = Theme::default()
            .with_primary(Color::rgb(255, 0, 0))
            .with_muted(Color::rgb(0, 255, 0));
        let header = loud.resolve(Role::TableHeader);
        assert_eq!(header.color, TABLE_HEADER_INK);
        assert!(header.bold);
        assert_eq!(header, Theme::default().resolve(Role::TableHeader));
    }

    #[test]
    fn test_partial_theme_deserialize() {
        let theme: Theme = serde_json::from_str(r##"{"primary": "#000000", "margin": 36}"##).unwrap();
        assert_eq!(theme.primary, Color::rgb(0, 0, 0));
        assert_eq!(theme.margin, 36.0);
        assert_eq!(theme.title_size, 34.0);
    }

    #[test]
    fn test_resolve_is_upright() {
        let theme = Theme::default();
        assert!(!theme.resolve(Role::Subtitle).italic);
        assert!(!theme.resolve(Role::Title).italic);
    }

    #[test]
    fn test_validate_default_theme() {
        assert!(Theme::default().validate(CanvasSize::widescreen()).is_ok());
        assert!(Theme::default().validate(CanvasSize::standard()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_margins() {
        let negative: Theme = serde_json::from_str(r#"{"margin": -100}"#).unwrap();
        assert!(matches!(
            negative.validate(CanvasSize::widescreen()),
            Err(Error::InvalidDeck(_))
        ));

        let huge: Theme = serde_json::from_str(r#"{"margin": 270}"#).unwrap();
        assert!(huge.validate(CanvasSize::widescreen()).is_err());

        let tiny_font: Theme = serde_json::from_str(r#"{"body_size": 0}"#).unwrap();
        assert!(tiny_font.validate(CanvasSize::widescreen()).is_err());

        assert!(Theme::default()
            .validate(CanvasSize::new(0.0, 540.0))
            .is_err());
    }
}
