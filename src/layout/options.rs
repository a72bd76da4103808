//! Layout metrics.

use crate::model::CanvasSize;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert inches to points.
pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

/// Fixed metrics of the slide layout. All lengths are in points.
///
/// The margin comes from the [`Theme`](crate::model::Theme); everything else
/// here is structural and shared by every page of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Canvas of every page
    pub canvas: CanvasSize,

    /// Top edge of the title region
    pub title_top: f32,

    /// Height of the title region
    pub title_height: f32,

    /// Top edge of the subtitle region
    pub subtitle_top: f32,

    /// Height of the subtitle region
    pub subtitle_height: f32,

    /// Space between the header area and the body region
    pub header_gap: f32,

    /// Space reserved at the bottom of the body region for a caption
    pub caption_reserve: f32,

    /// Height of the caption line inside the reservation
    pub caption_height: f32,

    /// Inner padding of code blocks
    pub code_padding: f32,

    /// Horizontal indent per bullet level
    pub bullet_indent: f32,

    /// Space after each bullet paragraph
    pub bullet_spacing: f32,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size.
    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the title anchor and height.
    pub fn with_title_region(mut self, top: f32, height: f32) -> Self {
        self.title_top = top;
        self.title_height = height;
        self
    }

    /// Set the subtitle anchor and height.
    pub fn with_subtitle_region(mut self, top: f32, height: f32) -> Self {
        self.subtitle_top = top;
        self.subtitle_height = height;
        self
    }

    /// Set the gap between header and body.
    pub fn with_header_gap(mut self, gap: f32) -> Self {
        self.header_gap = gap.max(0.0);
        self
    }

    /// Set the caption reservation and caption line height.
    ///
    /// The line height is clamped to the reservation.
    pub fn with_caption(mut self, reserve: f32, height: f32) -> Self {
        self.caption_reserve = reserve.max(0.0);
        self.caption_height = height.clamp(0.0, self.caption_reserve);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::widescreen(),
            title_top: inches(0.3),
            title_height: inches(0.9),
            subtitle_top: inches(1.25),
            subtitle_height: inches(0.8),
            header_gap: inches(0.15),
            caption_reserve: inches(0.5),
            caption_height: inches(0.3),
            code_padding: 8.0,
            bullet_indent: inches(0.25),
            bullet_spacing: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order_headers() {
        let options = LayoutOptions::default();
        assert!(options.title_top < options.subtitle_top);
        assert!(options.caption_height <= options.caption_reserve);
        assert_eq!(inches(1.0), 72.0);
    }

    #[test]
    fn test_caption_clamped() {
        let options = LayoutOptions::new().with_caption(20.0, 30.0);
        assert_eq!(options.caption_height, 20.0);
    }
}
