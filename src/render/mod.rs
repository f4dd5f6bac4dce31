//! Register rendering
//!
//! [`SheetPainter`] walks the block grid top to bottom and paints every cell
//! that intersects the viewport into a [`Frame`]. Cell content comes from a
//! [`TableModel`]; fixed line and divider colors come from the
//! [`RegisterTheme`].

pub mod borders;
mod cell;
pub mod cursor;
pub mod frame;
pub mod text;

pub use borders::resolve_borders;
pub use cursor::{render_cursor, CursorCell, CursorGeometry};
pub use frame::{blend_colors, Frame};
pub use text::{FontShaper, FontStyle, TextShaper};

use crate::config::{CellPadding, ReadOnlyRowEffect, RegisterConfig};
use crate::sheet::{PixelRect, Sheet, SheetBlock, VirtualCellLocation, VirtualLocation};
use crate::table::TableModel;
use crate::theme::RegisterTheme;

/// Scroll position and size of the visible canvas area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Render-time switches, projected from [`RegisterConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Take cell colors from the theme by category instead of the raw model colors
    pub use_theme_colors: bool,
    pub read_only_effect: ReadOnlyRowEffect,
    pub padding: CellPadding,
}

impl From<&RegisterConfig> for RenderOptions {
    fn from(config: &RegisterConfig) -> Self {
        Self {
            use_theme_colors: config.use_theme_colors,
            read_only_effect: config.read_only_effect,
            padding: config.padding,
        }
    }
}

/// Paints a sheet against a table model.
///
/// Holds only shared references; build one per frame.
pub struct SheetPainter<'a> {
    sheet: &'a Sheet,
    table: &'a dyn TableModel,
    theme: &'a RegisterTheme,
    options: RenderOptions,
}

impl<'a> SheetPainter<'a> {
    pub fn new(
        sheet: &'a Sheet,
        table: &'a dyn TableModel,
        theme: &'a RegisterTheme,
        options: RenderOptions,
    ) -> Self {
        Self {
            sheet,
            table,
            theme,
            options,
        }
    }

    /// Paint every visible block intersecting the viewport.
    ///
    /// Returns false when nothing could be drawn: a negative scroll origin, or
    /// no block (or an unstyled one) at the viewport origin. Running out of
    /// blocks part way down is a normal end of drawing.
    pub fn render_visible(
        &self,
        frame: &mut Frame,
        text: &mut dyn TextShaper,
        viewport: Viewport,
    ) -> bool {
        if viewport.x < 0 || viewport.y < 0 {
            tracing::trace!(x = viewport.x, y = viewport.y, "negative viewport origin");
            return false;
        }

        let Some((start, block)) = self.sheet.find_block_by_pixel(viewport.x, viewport.y) else {
            tracing::trace!(x = viewport.x, y = viewport.y, "no block at viewport origin");
            return false;
        };
        if block.style().is_none() {
            return false;
        }
        tracing::trace!(virt_row = start.virt_row, "starting render");

        let bottom = viewport.y + viewport.height;
        let mut blocks_painted = 0usize;
        let mut virt_row = start.virt_row;

        while virt_row < self.sheet.num_virt_rows() {
            // Hidden rows take no space; skip to the next visible one
            let block = loop {
                let vcell_loc = VirtualCellLocation::new(virt_row, start.virt_col);
                match self.sheet.block(vcell_loc) {
                    Some(block) if block.style().is_some() => {
                        if block.visible {
                            break block;
                        }
                        virt_row += 1;
                    }
                    _ => {
                        tracing::trace!(virt_row, blocks_painted, "ran out of blocks");
                        return true;
                    }
                }
            };

            if block.origin_y > bottom {
                tracing::trace!(virt_row, blocks_painted, "below viewport");
                return true;
            }

            blocks_painted +=
                self.render_row(frame, text, virt_row, start.virt_col, block, viewport);
            virt_row += 1;
        }

        tracing::trace!(blocks_painted, "reached last row");
        true
    }

    /// Paint the blocks of one virtual row from `first_col` rightwards.
    fn render_row(
        &self,
        frame: &mut Frame,
        text: &mut dyn TextShaper,
        virt_row: usize,
        first_col: usize,
        first_block: &SheetBlock,
        viewport: Viewport,
    ) -> usize {
        self.render_block(
            frame,
            text,
            VirtualCellLocation::new(virt_row, first_col),
            first_block,
            viewport,
        );
        let mut painted = 1;

        for virt_col in (first_col + 1)..self.sheet.num_virt_cols() {
            let vcell_loc = VirtualCellLocation::new(virt_row, virt_col);
            let Some(block) = self.sheet.block(vcell_loc) else {
                break;
            };
            if !block.visible || block.style().is_none() {
                continue;
            }
            if block.origin_x - viewport.x > viewport.width {
                break;
            }
            self.render_block(frame, text, vcell_loc, block, viewport);
            painted += 1;
        }
        painted
    }

    /// Paint the cells of one block, row-major.
    ///
    /// Columns are monotonic left to right and rows top to bottom, so the
    /// first cell past the right edge ends its row and the first cell past
    /// the bottom edge ends the block.
    pub fn render_block(
        &self,
        frame: &mut Frame,
        text: &mut dyn TextShaper,
        vcell_loc: VirtualCellLocation,
        block: &SheetBlock,
        viewport: Viewport,
    ) {
        let Some(style) = block.style() else {
            return;
        };

        for phys_row in 0..style.nrows() {
            for phys_col in 0..style.ncols() {
                let Some(cd) = style.cell_dimensions(phys_row, phys_col) else {
                    continue;
                };

                let x = block.origin_x + cd.origin_x - viewport.x;
                if x > viewport.width {
                    break;
                }

                let y = block.origin_y + cd.origin_y - viewport.y;
                if y > viewport.height {
                    return;
                }

                let (w, h) = (cd.pixel_width, cd.pixel_height);
                if w == 0 {
                    continue;
                }
                if x + w < 0 || y + h < 0 {
                    continue;
                }

                let loc = VirtualLocation {
                    vcell_loc,
                    phys_row_offset: phys_row,
                    phys_col_offset: phys_col,
                };
                self.render_cell(frame, text, style, loc, PixelRect::new(x, y, w, h));
            }
        }
    }

    /// Outline the cursor using the theme's cursor color
    pub fn render_cursor(&self, frame: &mut Frame, cursor: &CursorGeometry, viewport: Viewport) {
        render_cursor(frame, cursor, viewport, self.theme.cursor);
    }
}
