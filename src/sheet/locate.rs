//! Pixel hit-testing: canvas coordinates → cell address
//!
//! All scans are linear and first-match-wins in index order, so results are
//! deterministic even if ranges were to overlap.

use super::block::{Sheet, SheetBlock};
use super::location::{VirtualCellLocation, VirtualLocation};

impl Sheet {
    /// Find the first visible virtual row whose vertical pixel range contains `y`.
    ///
    /// Only the column-0 block of each row is consulted; rows share origin_y
    /// and height across columns.
    pub fn find_virt_row_by_pixel(&self, y: i32) -> Option<usize> {
        if y < 0 {
            return None;
        }
        for virt_row in 0..self.num_virt_rows() {
            let block = self.block(VirtualCellLocation::new(virt_row, 0))?;
            if block.visible && block.contains_y(y) {
                return Some(virt_row);
            }
        }
        None
    }

    /// Locate the block containing canvas pixel (x, y).
    ///
    /// The row scan skips invisible blocks; the column scan does not check
    /// visibility.
    // TODO: confirm with the register owners whether the column scan should
    // also skip invisible blocks; the row/column asymmetry is kept as-is.
    pub fn find_block_by_pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<(VirtualCellLocation, &SheetBlock)> {
        if x < 0 || y < 0 {
            return None;
        }

        let virt_row = self.find_virt_row_by_pixel(y)?;

        for virt_col in 0..self.num_virt_cols() {
            let vcell_loc = VirtualCellLocation::new(virt_row, virt_col);
            let block = self.block(vcell_loc)?;
            if block.contains_x(x) {
                return Some((vcell_loc, block));
            }
        }
        None
    }

    /// Locate the physical cell inside `block` containing canvas pixel (x, y).
    ///
    /// Rows are matched against column-0 dimensions, then columns within the
    /// matched row.
    pub fn find_cell_by_pixel(block: &SheetBlock, x: i32, y: i32) -> Option<(usize, usize)> {
        let style = block.style()?;
        let local_x = x - block.origin_x;
        let local_y = y - block.origin_y;

        let row = (0..style.nrows()).find(|&row| {
            style
                .cell_dimensions(row, 0)
                .is_some_and(|cd| cd.contains_y(local_y))
        })?;

        let col = (0..style.ncols()).find(|&col| {
            style
                .cell_dimensions(row, col)
                .is_some_and(|cd| cd.contains_x(local_x))
        })?;

        Some((row, col))
    }

    /// Map canvas pixel coordinates to a cell address.
    ///
    /// `None` means the point is outside every cell (e.g. below the last row,
    /// or negative coordinates). This is an ordinary outcome, not an error.
    pub fn locate(&self, x: i32, y: i32) -> Option<VirtualLocation> {
        let (vcell_loc, block) = self.find_block_by_pixel(x, y)?;
        let (phys_row_offset, phys_col_offset) = Self::find_cell_by_pixel(block, x, y)?;
        Some(VirtualLocation {
            vcell_loc,
            phys_row_offset,
            phys_col_offset,
        })
    }
}
