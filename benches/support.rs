//! Shared helpers for benchmarks

use std::rc::Rc;

use regsheet::render::{FontStyle, Frame, TextShaper};
use regsheet::table::{BorderSeverity, CellAlignment, PhysicalCellBorders};
use regsheet::{Color, MemoryTable, Sheet, SheetBlockStyle, VirtualLocation};

/// Header row plus `transactions` two-line ledger blocks
#[allow(dead_code)]
pub fn make_ledger(transactions: usize) -> Sheet {
    let header = Rc::new(
        SheetBlockStyle::new(&[20], &[vec![80, 300, 130, 130]]).expect("header style"),
    );
    let txn = Rc::new(
        SheetBlockStyle::new(&[20, 20], &[vec![80, 300, 130, 130], vec![80, 300, 260]])
            .expect("transaction style"),
    );
    let rows = std::iter::once((header, true))
        .chain((0..transactions).map(|_| (Rc::clone(&txn), true)));
    Sheet::single_column(rows)
}

/// Table with an entry and a normal border on every first-line cell
#[allow(dead_code)]
pub fn make_table(sheet: &Sheet) -> MemoryTable {
    let mut table = MemoryTable::from_sheet(sheet);
    table.default_cell.borders = PhysicalCellBorders::uniform(BorderSeverity::Light);
    for virt_row in 1..sheet.num_virt_rows() {
        for phys_col in 0..4 {
            let cell = table.cell_mut(VirtualLocation::new(virt_row, 0, 0, phys_col));
            cell.entry = format!("{}.{}", virt_row, phys_col);
            cell.borders.bottom = BorderSeverity::Normal;
            if phys_col >= 2 {
                cell.alignment = CellAlignment::Right;
            }
        }
    }
    table.active_virt_row = Some(1);
    table
}

/// Fixed-width shaper that only touches the frame clip, so benchmarks measure
/// the layout and fill work rather than glyph rasterization
#[derive(Debug, Default)]
pub struct NullShaper {
    pub drawn: usize,
}

impl TextShaper for NullShaper {
    fn measure(&mut self, text: &str, _style: FontStyle) -> i32 {
        text.chars().count() as i32 * 8
    }

    fn draw(
        &mut self,
        frame: &mut Frame,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        _style: FontStyle,
    ) {
        if !text.is_empty() {
            frame.set_pixel(x, y, color.to_argb_u32());
            self.drawn += 1;
        }
    }
}
