//! Text drawing seam and a fontdue-backed implementation
//!
//! Cell rendering only needs to measure a single line and draw it; font
//! selection and shaping stay behind [`TextShaper`].

use std::collections::HashMap;

use fontdue::{Font, FontSettings, Metrics};

use super::frame::Frame;
use crate::theme::Color;

/// Slant applied per pixel above the baseline when faking italics
const SYNTHETIC_ITALIC_SLANT: f32 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Measures and draws single-line text
pub trait TextShaper {
    /// Logical width of `text` in pixels
    fn measure(&mut self, text: &str, style: FontStyle) -> i32;

    /// Draw `text` with its layout box's top-left corner at (x, y).
    /// Drawing respects the frame's clip rectangle.
    fn draw(
        &mut self,
        frame: &mut Frame,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        style: FontStyle,
    );
}

/// (character, font size bits, italic face)
pub type GlyphCacheKey = (char, u32, bool);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// [`TextShaper`] rasterizing glyphs with fontdue.
///
/// Uses the italic face when one is supplied, otherwise slants the regular
/// face.
pub struct FontShaper {
    regular: Font,
    italic: Option<Font>,
    glyph_cache: GlyphCache,
    font_size: f32,
    ascent: f32,
}

impl FontShaper {
    pub fn from_bytes(
        regular: &[u8],
        italic: Option<&[u8]>,
        font_size: f32,
    ) -> anyhow::Result<Self> {
        let regular = Font::from_bytes(regular, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;
        let italic = italic
            .map(|bytes| {
                Font::from_bytes(bytes, FontSettings::default())
                    .map_err(|e| anyhow::anyhow!("Failed to load italic font: {}", e))
            })
            .transpose()?;
        Ok(Self::new(regular, italic, font_size))
    }

    pub fn new(regular: Font, italic: Option<Font>, font_size: f32) -> Self {
        let ascent = regular
            .horizontal_line_metrics(font_size)
            .map_or(font_size * 0.8, |m| m.ascent);
        Self {
            regular,
            italic,
            glyph_cache: GlyphCache::new(),
            font_size,
            ascent,
        }
    }

    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Number of cached glyph bitmaps
    #[inline]
    pub fn glyph_cache_size(&self) -> usize {
        self.glyph_cache.len()
    }

    fn glyph(&mut self, ch: char, style: FontStyle) -> &(Metrics, Vec<u8>) {
        let use_italic_face = style == FontStyle::Italic && self.italic.is_some();
        let key = (ch, self.font_size.to_bits(), use_italic_face);
        let font = match (&self.italic, use_italic_face) {
            (Some(italic), true) => italic,
            _ => &self.regular,
        };
        let size = self.font_size;
        self.glyph_cache
            .entry(key)
            .or_insert_with(|| font.rasterize(ch, size))
    }
}

impl TextShaper for FontShaper {
    fn measure(&mut self, text: &str, style: FontStyle) -> i32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.glyph(ch, style).0.advance_width)
            .sum();
        width.ceil() as i32
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        style: FontStyle,
    ) {
        let argb = color.to_argb_u32();
        let synthetic_slant = style == FontStyle::Italic && self.italic.is_none();
        let baseline = y as f32 + self.ascent;
        let mut current_x = x as f32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch, style);
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for (bitmap_idx, &alpha) in bitmap.iter().enumerate() {
                if alpha == 0 || metrics.width == 0 {
                    continue;
                }
                let bitmap_x = bitmap_idx % metrics.width;
                let bitmap_y = bitmap_idx / metrics.width;
                let py = glyph_top + bitmap_y as f32;
                let slant = if synthetic_slant {
                    ((baseline - py) * SYNTHETIC_ITALIC_SLANT) as i32
                } else {
                    0
                };
                let px = current_x as i32 + bitmap_x as i32 + metrics.xmin + slant;
                frame.blend_pixel(px, py as i32, argb, alpha);
            }

            current_x += metrics.advance_width;
        }
    }
}
