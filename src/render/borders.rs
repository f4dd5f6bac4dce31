//! Border merging between neighbouring cells
//!
//! Each edge takes the stronger of the cell's own severity and the facing
//! edge of its neighbour, so both sides of a shared edge agree.

use crate::sheet::{Sheet, VirtualLocation};
use crate::table::{PhysicalCellBorders, TableModel};

/// Resolve the borders to draw for `loc`.
///
/// Vertical neighbours come from the table's row navigation, which may cross
/// block and virtual-row boundaries. Horizontal neighbours are the adjacent
/// physical columns of the same block.
pub fn resolve_borders<T>(sheet: &Sheet, table: &T, loc: VirtualLocation) -> PhysicalCellBorders
where
    T: TableModel + ?Sized,
{
    let mut borders = table.borders(loc);

    if let Some(above) = table.move_vertical(loc, -1) {
        borders.top = borders.top.merge(table.borders(above).bottom);
    }

    if let Some(below) = table.move_vertical(loc, 1) {
        borders.bottom = borders.bottom.merge(table.borders(below).top);
    }

    if let Some(left) = horizontal_neighbor(sheet, table, loc, -1) {
        borders.left = borders.left.merge(table.borders(left).right);
    }

    if let Some(right) = horizontal_neighbor(sheet, table, loc, 1) {
        borders.right = borders.right.merge(table.borders(right).left);
    }

    borders
}

fn horizontal_neighbor<T>(
    sheet: &Sheet,
    table: &T,
    loc: VirtualLocation,
    delta: isize,
) -> Option<VirtualLocation>
where
    T: TableModel + ?Sized,
{
    let neighbor = loc.with_col_delta(delta)?;
    let style = sheet.block(loc.vcell_loc)?.style()?;
    (style.contains(neighbor.phys_row_offset, neighbor.phys_col_offset)
        && table.is_addressable(neighbor))
    .then_some(neighbor)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::sheet::SheetBlockStyle;
    use crate::table::{BorderSeverity, MemoryTable};

    fn fixture() -> (Sheet, MemoryTable) {
        let style = Rc::new(SheetBlockStyle::uniform(&[20, 20], &[40, 40, 40]).unwrap());
        let sheet = Sheet::single_column(vec![(Rc::clone(&style), true), (style, true)]);
        let table = MemoryTable::from_sheet(&sheet);
        (sheet, table)
    }

    #[test]
    fn test_isolated_cell_keeps_own_borders() {
        let (sheet, mut table) = fixture();
        let loc = VirtualLocation::new(0, 0, 0, 0);
        table.cell_mut(loc).borders = PhysicalCellBorders::uniform(BorderSeverity::Light);

        let b = resolve_borders(&sheet, &table, loc);
        assert_eq!(b, PhysicalCellBorders::uniform(BorderSeverity::Light));
    }

    #[test]
    fn test_horizontal_merge_is_symmetric() {
        let (sheet, mut table) = fixture();
        let left = VirtualLocation::new(0, 0, 0, 0);
        let right = VirtualLocation::new(0, 0, 0, 1);
        table.cell_mut(left).borders.right = BorderSeverity::Light;
        table.cell_mut(right).borders.left = BorderSeverity::Heavy;

        let lb = resolve_borders(&sheet, &table, left);
        let rb = resolve_borders(&sheet, &table, right);
        assert_eq!(lb.right, BorderSeverity::Heavy);
        assert_eq!(rb.left, BorderSeverity::Heavy);
    }

    #[test]
    fn test_vertical_merge_crosses_blocks() {
        let (sheet, mut table) = fixture();
        let upper = VirtualLocation::new(0, 0, 1, 2);
        let lower = VirtualLocation::new(1, 0, 0, 2);
        table.cell_mut(upper).borders.bottom = BorderSeverity::Highlight;
        table.cell_mut(lower).borders.top = BorderSeverity::Normal;

        assert_eq!(
            resolve_borders(&sheet, &table, lower).top,
            BorderSeverity::Highlight
        );
        assert_eq!(
            resolve_borders(&sheet, &table, upper).bottom,
            BorderSeverity::Highlight
        );
    }

    #[test]
    fn test_edge_columns_have_no_outer_neighbor() {
        let (sheet, mut table) = fixture();
        let first = VirtualLocation::new(0, 0, 0, 0);
        table.cell_mut(first).borders.left = BorderSeverity::None;
        // Nothing to the left of column 0, so it stays as declared
        assert_eq!(
            resolve_borders(&sheet, &table, first).left,
            BorderSeverity::None
        );
    }

    #[test]
    fn test_unaddressable_neighbor_is_ignored() {
        let (sheet, mut table) = fixture();
        let a = VirtualLocation::new(0, 0, 0, 0);
        let b = VirtualLocation::new(0, 0, 0, 1);
        table.cell_mut(b).borders.left = BorderSeverity::Highlight;
        table.cell_mut(b).addressable = false;

        assert_eq!(resolve_borders(&sheet, &table, a).right, BorderSeverity::None);
    }
}
