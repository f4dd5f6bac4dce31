//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code. Coordinates
//! are signed integer pixels so callers can pass viewport-relative positions
//! that start left of or above the frame.

use crate::sheet::PixelRect;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). `alpha` is the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Half-open pixel bounds (inclusive start, exclusive end)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// Out-of-bounds operations are clipped to the frame and to the optional
/// clip rectangle.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<Bounds>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Underlying pixel buffer (row-major ARGB)
    #[inline]
    pub fn buffer(&self) -> &[u32] {
        self.buffer
    }

    #[inline]
    fn frame_bounds(&self) -> Bounds {
        Bounds {
            x0: 0,
            y0: 0,
            x1: i32::try_from(self.width).unwrap_or(i32::MAX),
            y1: i32::try_from(self.height).unwrap_or(i32::MAX),
        }
    }

    /// Frame bounds intersected with the clip rectangle
    #[inline]
    fn bounds(&self) -> Bounds {
        let frame = self.frame_bounds();
        match self.clip {
            Some(c) => Bounds {
                x0: c.x0.max(frame.x0),
                y0: c.y0.max(frame.y0),
                x1: c.x1.min(frame.x1),
                y1: c.y1.min(frame.y1),
            },
            None => frame,
        }
    }

    /// Set a clipping rectangle. All subsequent drawing operations will be
    /// constrained to this region.
    pub fn set_clip(&mut self, rect: PixelRect) {
        self.clip = Some(Bounds {
            x0: rect.x,
            y0: rect.y,
            x1: rect.right().max(rect.x),
            y1: rect.bottom().max(rect.y),
        });
    }

    /// Remove the clipping rectangle, restoring full-frame drawing.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: PixelRect, color: u32) {
        let b = self.bounds();
        let x0 = rect.x.max(b.x0);
        let y0 = rect.y.max(b.y0);
        let x1 = rect.right().min(b.x1);
        let y1 = rect.bottom().min(b.y1);

        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(idx) = self.index(x, y) {
                    self.buffer[idx] = color;
                }
            }
        }
    }

    /// 1px horizontal segment covering columns `[x1, x2)` of row `y`
    #[inline]
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: u32) {
        self.fill_rect(PixelRect::new(x1, y, x2 - x1, 1), color);
    }

    /// 1px vertical segment covering rows `[y1, y2)` of column `x`
    #[inline]
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: u32) {
        self.fill_rect(PixelRect::new(x, y1, 1, y2 - y1), color);
    }

    /// 1px outline along the inside edges of `rect`
    pub fn stroke_rect(&mut self, rect: PixelRect, color: u32) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.hline(rect.x, rect.right(), rect.y, color);
        self.hline(rect.x, rect.right(), rect.bottom() - 1, color);
        self.vline(rect.x, rect.y, rect.bottom(), color);
        self.vline(rect.right() - 1, rect.y, rect.bottom(), color);
    }

    /// Set a single pixel (bounds-checked, respects clip rect)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let b = self.bounds();
        if x >= b.x0 && x < b.x1 && y >= b.y0 && y < b.y1 {
            if let Some(idx) = self.index(x, y) {
                self.buffer[idx] = color;
            }
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(0, |idx| self.buffer[idx])
    }

    /// Blend a pixel by a coverage value (0 = untouched, 255 = solid)
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: u32, coverage: u8) {
        if coverage == 0 {
            return;
        }
        let b = self.bounds();
        if x < b.x0 || x >= b.x1 || y < b.y0 || y >= b.y1 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.buffer[idx] = if coverage == 0xFF {
                color | 0xFF000000
            } else {
                blend_colors(self.buffer[idx], color, coverage as f32 / 255.0)
            };
        }
    }
}
