//! Two-level cell addressing
//!
//! A register is a grid of blocks (virtual cells). Each block is itself a
//! small grid of physical cells laid out by a shared style.

/// Index of a block in the virtual grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VirtualCellLocation {
    pub virt_row: usize,
    pub virt_col: usize,
}

impl VirtualCellLocation {
    pub const fn new(virt_row: usize, virt_col: usize) -> Self {
        Self { virt_row, virt_col }
    }
}

/// Full address of a physical cell: the owning block plus the offsets inside it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VirtualLocation {
    pub vcell_loc: VirtualCellLocation,
    pub phys_row_offset: usize,
    pub phys_col_offset: usize,
}

impl VirtualLocation {
    pub const fn new(
        virt_row: usize,
        virt_col: usize,
        phys_row_offset: usize,
        phys_col_offset: usize,
    ) -> Self {
        Self {
            vcell_loc: VirtualCellLocation::new(virt_row, virt_col),
            phys_row_offset,
            phys_col_offset,
        }
    }

    /// Location of the first physical cell of a block
    pub const fn block_origin(vcell_loc: VirtualCellLocation) -> Self {
        Self {
            vcell_loc,
            phys_row_offset: 0,
            phys_col_offset: 0,
        }
    }

    #[inline]
    pub fn virt_row(&self) -> usize {
        self.vcell_loc.virt_row
    }

    #[inline]
    pub fn virt_col(&self) -> usize {
        self.vcell_loc.virt_col
    }

    /// Same block, neighbouring physical column. `None` when stepping left of column 0.
    pub fn with_col_delta(&self, delta: isize) -> Option<Self> {
        let col = self.phys_col_offset.checked_add_signed(delta)?;
        Some(Self {
            phys_col_offset: col,
            ..*self
        })
    }
}
