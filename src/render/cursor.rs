//! Cursor outline for the active virtual row and cell

use super::frame::Frame;
use super::Viewport;
use crate::sheet::{PixelRect, Sheet, VirtualLocation};
use crate::theme::Color;

/// Active cell inside the cursor row.
///
/// `x` is in canvas space; `y` is relative to the top of the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorCell {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Canvas-space geometry of the block cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorGeometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub cell: CursorCell,
}

impl CursorGeometry {
    /// Cursor covering the block of `loc`, with `loc`'s cell as the active cell
    pub fn for_location(sheet: &Sheet, loc: VirtualLocation) -> Option<Self> {
        let block = sheet.block(loc.vcell_loc)?;
        let cell = sheet.cell_rect(loc)?;
        Some(Self {
            x: block.origin_x,
            y: block.origin_y,
            w: block.width(),
            h: block.height(),
            cell: CursorCell {
                x: cell.x,
                y: cell.y - block.origin_y,
                w: cell.width,
                h: cell.height,
            },
        })
    }

    /// Row rectangle in viewport space
    pub fn row_rect(&self, viewport: Viewport) -> PixelRect {
        PixelRect::new(self.x - viewport.x, self.y - viewport.y, self.w, self.h)
    }

    /// Cell rectangle in viewport space
    pub fn cell_rect(&self, viewport: Viewport) -> PixelRect {
        PixelRect::new(
            self.cell.x - viewport.x,
            self.y + self.cell.y - viewport.y,
            self.cell.w,
            self.cell.h,
        )
    }
}

/// Outline the active row and cell. Nothing is filled.
///
/// The row gets a second rule one pixel above its bottom edge.
pub fn render_cursor(frame: &mut Frame, cursor: &CursorGeometry, viewport: Viewport, color: Color) {
    let argb = color.to_argb_u32();

    let row = cursor.row_rect(viewport);
    frame.stroke_rect(row, argb);
    frame.hline(row.x, row.right(), row.bottom() - 2, argb);

    frame.stroke_rect(cursor.cell_rect(viewport), argb);
}
