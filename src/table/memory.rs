//! In-memory table model
//!
//! Stores per-cell content in a map and mirrors the block shapes of a
//! [`Sheet`] so it can answer navigation queries. Used by the snapshot tool,
//! tests and benchmarks.

use std::borrow::Cow;
use std::collections::HashMap;

use super::{
    CellAlignment, CellBackground, ColorCategory, DividerRows, PhysicalCellBorders, TableModel,
    ThemedBackground,
};
use crate::sheet::{Sheet, VirtualCellLocation, VirtualLocation};
use crate::theme::Color;

/// Content of one physical cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub entry: String,
    pub label: String,
    pub alignment: CellAlignment,
    pub fg_color: Color,
    pub bg_color: Color,
    pub fg_category: ColorCategory,
    pub bg_category: ColorCategory,
    pub hatching: bool,
    pub borders: PhysicalCellBorders,
    /// Cleared for cells a cursor may not land on
    pub addressable: bool,
}

impl Default for CellSpec {
    fn default() -> Self {
        Self {
            entry: String::new(),
            label: String::new(),
            alignment: CellAlignment::Left,
            fg_color: Color::rgb(0x00, 0x00, 0x00),
            bg_color: Color::rgb(0xFF, 0xFF, 0xFF),
            fg_category: ColorCategory::Primary,
            bg_category: ColorCategory::Primary,
            hatching: false,
            borders: PhysicalCellBorders::default(),
            addressable: true,
        }
    }
}

impl CellSpec {
    pub fn with_entry(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BlockShape {
    nrows: usize,
    ncols: usize,
    visible: bool,
}

/// A [`TableModel`] backed by a hash map of [`CellSpec`]s
#[derive(Debug, Clone)]
pub struct MemoryTable {
    num_virt_rows: usize,
    num_virt_cols: usize,
    /// Row-major; `None` for blocks without a style
    shapes: Vec<Option<BlockShape>>,
    cells: HashMap<VirtualLocation, CellSpec>,
    /// Content of cells without an explicit entry
    pub default_cell: CellSpec,
    pub dividers: DividerRows,
    pub active_virt_row: Option<usize>,
}

impl MemoryTable {
    /// Snapshot the block shapes of a sheet. Rebuild the table whenever the
    /// sheet is rebuilt.
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let mut shapes = Vec::with_capacity(sheet.num_virt_rows() * sheet.num_virt_cols());
        for virt_row in 0..sheet.num_virt_rows() {
            for virt_col in 0..sheet.num_virt_cols() {
                let shape = sheet
                    .block(VirtualCellLocation::new(virt_row, virt_col))
                    .and_then(|block| {
                        block.style().map(|style| BlockShape {
                            nrows: style.nrows(),
                            ncols: style.ncols(),
                            visible: block.visible,
                        })
                    });
                shapes.push(shape);
            }
        }

        Self {
            num_virt_rows: sheet.num_virt_rows(),
            num_virt_cols: sheet.num_virt_cols(),
            shapes,
            cells: HashMap::new(),
            default_cell: CellSpec::default(),
            dividers: DividerRows::NONE,
            active_virt_row: None,
        }
    }

    pub fn set_cell(&mut self, loc: VirtualLocation, spec: CellSpec) {
        self.cells.insert(loc, spec);
    }

    /// Mutable access to a cell, seeded from `default_cell` on first use
    pub fn cell_mut(&mut self, loc: VirtualLocation) -> &mut CellSpec {
        let default = &self.default_cell;
        self.cells.entry(loc).or_insert_with(|| default.clone())
    }

    pub fn cell(&self, loc: VirtualLocation) -> &CellSpec {
        self.cells.get(&loc).unwrap_or(&self.default_cell)
    }

    fn shape(&self, vcell_loc: VirtualCellLocation) -> Option<BlockShape> {
        if vcell_loc.virt_row >= self.num_virt_rows || vcell_loc.virt_col >= self.num_virt_cols {
            return None;
        }
        self.shapes
            .get(vcell_loc.virt_row * self.num_virt_cols + vcell_loc.virt_col)
            .copied()
            .flatten()
    }

    /// Candidate one physical row down, crossing into later virtual rows
    fn row_below(&self, loc: VirtualLocation) -> Option<VirtualLocation> {
        let shape = self.shape(loc.vcell_loc)?;
        if loc.phys_row_offset + 1 < shape.nrows {
            return Some(VirtualLocation {
                phys_row_offset: loc.phys_row_offset + 1,
                ..loc
            });
        }
        ((loc.virt_row() + 1)..self.num_virt_rows)
            .map(|virt_row| VirtualCellLocation::new(virt_row, loc.virt_col()))
            .find(|&vcell| self.shape(vcell).is_some_and(|s| s.visible && s.nrows > 0))
            .map(|vcell_loc| VirtualLocation {
                vcell_loc,
                phys_row_offset: 0,
                phys_col_offset: loc.phys_col_offset,
            })
    }

    /// Candidate one physical row up, crossing into earlier virtual rows
    fn row_above(&self, loc: VirtualLocation) -> Option<VirtualLocation> {
        if loc.phys_row_offset > 0 {
            return Some(VirtualLocation {
                phys_row_offset: loc.phys_row_offset - 1,
                ..loc
            });
        }
        (0..loc.virt_row())
            .rev()
            .map(|virt_row| VirtualCellLocation::new(virt_row, loc.virt_col()))
            .find_map(|vcell_loc| {
                let shape = self.shape(vcell_loc)?;
                (shape.visible && shape.nrows > 0).then_some(VirtualLocation {
                    vcell_loc,
                    phys_row_offset: shape.nrows - 1,
                    phys_col_offset: loc.phys_col_offset,
                })
            })
    }
}

impl TableModel for MemoryTable {
    fn entry(&self, loc: VirtualLocation) -> Cow<'_, str> {
        Cow::Borrowed(self.cell(loc).entry.as_str())
    }

    fn label(&self, loc: VirtualLocation) -> Cow<'_, str> {
        Cow::Borrowed(self.cell(loc).label.as_str())
    }

    fn alignment(&self, loc: VirtualLocation) -> CellAlignment {
        self.cell(loc).alignment
    }

    fn fg_color(&self, loc: VirtualLocation) -> Color {
        self.cell(loc).fg_color
    }

    fn bg_color(&self, loc: VirtualLocation) -> CellBackground {
        let cell = self.cell(loc);
        CellBackground {
            color: cell.bg_color,
            hatching: cell.hatching,
        }
    }

    fn theme_fg_color(&self, loc: VirtualLocation) -> ColorCategory {
        self.cell(loc).fg_category
    }

    fn theme_bg_color(&self, loc: VirtualLocation) -> ThemedBackground {
        let cell = self.cell(loc);
        ThemedBackground {
            category: cell.bg_category,
            hatching: cell.hatching,
        }
    }

    fn borders(&self, loc: VirtualLocation) -> PhysicalCellBorders {
        self.cell(loc).borders
    }

    fn dividers(&self) -> DividerRows {
        self.dividers
    }

    fn active_virt_row(&self) -> Option<usize> {
        self.active_virt_row
    }

    fn move_vertical(&self, loc: VirtualLocation, delta: isize) -> Option<VirtualLocation> {
        let mut current = loc;
        for _ in 0..delta.unsigned_abs() {
            // Skip rows whose cell in this column cannot be addressed
            loop {
                current = if delta > 0 {
                    self.row_below(current)?
                } else {
                    self.row_above(current)?
                };
                if self.is_addressable(current) {
                    break;
                }
            }
        }
        Some(current)
    }

    fn is_addressable(&self, loc: VirtualLocation) -> bool {
        let Some(shape) = self.shape(loc.vcell_loc) else {
            return false;
        };
        shape.visible
            && loc.phys_row_offset < shape.nrows
            && loc.phys_col_offset < shape.ncols
            && self.cell(loc).addressable
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::sheet::SheetBlockStyle;

    fn table() -> MemoryTable {
        let two_rows = Rc::new(SheetBlockStyle::uniform(&[20, 20], &[40, 40]).unwrap());
        let one_row = Rc::new(SheetBlockStyle::uniform(&[20], &[80]).unwrap());
        let sheet = Sheet::single_column(vec![
            (Rc::clone(&two_rows), true),
            (Rc::clone(&two_rows), false),
            (Rc::clone(&one_row), true),
            (Rc::clone(&two_rows), true),
        ]);
        MemoryTable::from_sheet(&sheet)
    }

    #[test]
    fn test_move_within_block() {
        let t = table();
        assert_eq!(
            t.move_vertical(VirtualLocation::new(0, 0, 0, 1), 1),
            Some(VirtualLocation::new(0, 0, 1, 1))
        );
    }

    #[test]
    fn test_move_down_skips_hidden_row() {
        let t = table();
        assert_eq!(
            t.move_vertical(VirtualLocation::new(0, 0, 1, 0), 1),
            Some(VirtualLocation::new(2, 0, 0, 0))
        );
    }

    #[test]
    fn test_move_up_lands_on_last_physical_row() {
        let t = table();
        assert_eq!(
            t.move_vertical(VirtualLocation::new(2, 0, 0, 0), -1),
            Some(VirtualLocation::new(0, 0, 1, 0))
        );
    }

    #[test]
    fn test_move_skips_rows_without_the_column() {
        let t = table();
        // Row 2 has a single column, so column 1 continues into row 3
        assert_eq!(
            t.move_vertical(VirtualLocation::new(0, 0, 1, 1), 1),
            Some(VirtualLocation::new(3, 0, 0, 1))
        );
    }

    #[test]
    fn test_move_off_the_edges() {
        let t = table();
        assert_eq!(t.move_vertical(VirtualLocation::new(0, 0, 0, 0), -1), None);
        assert_eq!(t.move_vertical(VirtualLocation::new(3, 0, 1, 0), 1), None);
    }

    #[test]
    fn test_addressable() {
        let mut t = table();
        assert!(t.is_addressable(VirtualLocation::new(0, 0, 1, 1)));
        assert!(!t.is_addressable(VirtualLocation::new(0, 0, 0, 2)));
        assert!(!t.is_addressable(VirtualLocation::new(1, 0, 0, 0)));
        assert!(!t.is_addressable(VirtualLocation::new(9, 0, 0, 0)));

        t.cell_mut(VirtualLocation::new(0, 0, 0, 0)).addressable = false;
        assert!(!t.is_addressable(VirtualLocation::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_default_cell_content() {
        let mut t = table();
        t.default_cell.label = "Memo".to_string();
        t.set_cell(VirtualLocation::new(0, 0, 0, 0), CellSpec::with_entry("Coffee"));
        assert_eq!(t.entry(VirtualLocation::new(0, 0, 0, 0)), "Coffee");
        assert_eq!(t.entry(VirtualLocation::new(0, 0, 0, 1)), "");
        assert_eq!(t.label(VirtualLocation::new(0, 0, 0, 1)), "Memo");
    }
}
