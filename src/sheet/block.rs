//! Blocks and the virtual block grid

use std::rc::Rc;

use super::location::{VirtualCellLocation, VirtualLocation};
use super::style::SheetBlockStyle;
use super::{LayoutError, PixelRect};

/// One virtual-row/virtual-column intersection.
///
/// The style is shared with every other block of the same shape and is never
/// mutated through the block.
#[derive(Debug, Clone, Default)]
pub struct SheetBlock {
    /// Canvas-space x of the block's left edge
    pub origin_x: i32,
    /// Canvas-space y of the block's top edge
    pub origin_y: i32,
    pub visible: bool,
    style: Option<Rc<SheetBlockStyle>>,
}

impl SheetBlock {
    pub fn new(style: Rc<SheetBlockStyle>, visible: bool) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            visible,
            style: Some(style),
        }
    }

    #[inline]
    pub fn style(&self) -> Option<&SheetBlockStyle> {
        self.style.as_deref()
    }

    /// Shared handle to the style, for callers building further blocks
    #[inline]
    pub fn style_handle(&self) -> Option<&Rc<SheetBlockStyle>> {
        self.style.as_ref()
    }

    /// Block height in pixels (0 without a style)
    #[inline]
    pub fn height(&self) -> i32 {
        self.style().map_or(0, SheetBlockStyle::height)
    }

    /// Block width in pixels (0 without a style)
    #[inline]
    pub fn width(&self) -> i32 {
        self.style().map_or(0, SheetBlockStyle::width)
    }

    /// Whether canvas y falls inside `[origin_y, origin_y + height)`
    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.origin_y && y < self.origin_y + self.height()
    }

    /// Whether canvas x falls inside `[origin_x, origin_x + width)`
    #[inline]
    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.origin_x && x < self.origin_x + self.width()
    }
}

/// The virtual block grid of a register.
///
/// Rebuilt wholesale by a layout pass whenever the underlying data changes;
/// read-only while rendering or hit-testing.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    num_virt_rows: usize,
    num_virt_cols: usize,
    /// Row-major, `num_virt_rows * num_virt_cols` entries
    blocks: Vec<SheetBlock>,
}

impl Sheet {
    /// Create a grid of invisible, unstyled blocks
    pub fn new(num_virt_rows: usize, num_virt_cols: usize) -> Self {
        Self {
            num_virt_rows,
            num_virt_cols,
            blocks: vec![SheetBlock::default(); num_virt_rows * num_virt_cols],
        }
    }

    /// Build a one-column register from `(style, visible)` rows and lay it out
    pub fn single_column<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Rc<SheetBlockStyle>, bool)>,
    {
        let blocks: Vec<SheetBlock> = rows
            .into_iter()
            .map(|(style, visible)| SheetBlock::new(style, visible))
            .collect();
        let mut sheet = Self {
            num_virt_rows: blocks.len(),
            num_virt_cols: if blocks.is_empty() { 0 } else { 1 },
            blocks,
        };
        sheet.compute_origins();
        sheet
    }

    #[inline]
    pub fn num_virt_rows(&self) -> usize {
        self.num_virt_rows
    }

    #[inline]
    pub fn num_virt_cols(&self) -> usize {
        self.num_virt_cols
    }

    fn index(&self, vcell_loc: VirtualCellLocation) -> Option<usize> {
        if vcell_loc.virt_row >= self.num_virt_rows || vcell_loc.virt_col >= self.num_virt_cols {
            return None;
        }
        Some(vcell_loc.virt_row * self.num_virt_cols + vcell_loc.virt_col)
    }

    pub fn block(&self, vcell_loc: VirtualCellLocation) -> Option<&SheetBlock> {
        self.index(vcell_loc).and_then(|i| self.blocks.get(i))
    }

    /// Install a block. Origins are stale until [`Sheet::compute_origins`] runs.
    pub fn set_block(
        &mut self,
        vcell_loc: VirtualCellLocation,
        style: Rc<SheetBlockStyle>,
        visible: bool,
    ) -> Result<(), LayoutError> {
        let idx = self
            .index(vcell_loc)
            .ok_or(LayoutError::BlockOutOfRange(vcell_loc))?;
        if let Some(block) = self.blocks.get_mut(idx) {
            *block = SheetBlock::new(style, visible);
        }
        Ok(())
    }

    pub fn set_visible(
        &mut self,
        vcell_loc: VirtualCellLocation,
        visible: bool,
    ) -> Result<(), LayoutError> {
        let idx = self
            .index(vcell_loc)
            .ok_or(LayoutError::BlockOutOfRange(vcell_loc))?;
        if let Some(block) = self.blocks.get_mut(idx) {
            block.visible = visible;
        }
        Ok(())
    }

    /// Lay blocks out rectilinearly.
    ///
    /// Each virtual row starts where the previous visible row ended; its height
    /// is the height of its column-0 block. Invisible rows occupy no space.
    /// Within a row, visible blocks are placed left to right.
    pub fn compute_origins(&mut self) {
        let ncols = self.num_virt_cols;
        let mut y = 0;

        for row in 0..self.num_virt_rows {
            let start = row * ncols;
            let Some(row_blocks) = self.blocks.get_mut(start..start + ncols) else {
                break;
            };

            let mut x = 0;
            for block in row_blocks.iter_mut() {
                block.origin_x = x;
                block.origin_y = y;
                if block.visible {
                    x += block.width();
                }
            }

            if let Some(first) = row_blocks.first() {
                if first.visible {
                    y += first.height();
                }
            }
        }

        tracing::debug!(
            rows = self.num_virt_rows,
            cols = self.num_virt_cols,
            height = y,
            "computed block origins"
        );
    }

    /// Total canvas height covered by visible rows
    pub fn total_height(&self) -> i32 {
        (0..self.num_virt_rows)
            .rev()
            .filter_map(|row| self.block(VirtualCellLocation::new(row, 0)))
            .find(|block| block.visible)
            .map_or(0, |block| block.origin_y + block.height())
    }

    /// Widest visible row, in pixels
    pub fn total_width(&self) -> i32 {
        self.blocks
            .chunks(self.num_virt_cols.max(1))
            .filter(|row| row.first().is_some_and(|b| b.visible))
            .filter_map(|row| row.iter().rev().find(|b| b.visible))
            .map(|block| block.origin_x + block.width())
            .max()
            .unwrap_or(0)
    }

    /// Canvas-space rectangle of a physical cell
    pub fn cell_rect(&self, loc: VirtualLocation) -> Option<PixelRect> {
        let block = self.block(loc.vcell_loc)?;
        let cd = block
            .style()?
            .cell_dimensions(loc.phys_row_offset, loc.phys_col_offset)?;
        Some(PixelRect::new(
            block.origin_x + cd.origin_x,
            block.origin_y + cd.origin_y,
            cd.pixel_width,
            cd.pixel_height,
        ))
    }
}
