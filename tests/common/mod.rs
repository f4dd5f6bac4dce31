//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use regsheet::render::{FontStyle, Frame, TextShaper};
use regsheet::table::{
    CellAlignment, CellBackground, ColorCategory, DividerRows, PhysicalCellBorders, TableModel,
    ThemedBackground,
};
use regsheet::{
    Color, MemoryTable, RegisterTheme, RenderOptions, Sheet, SheetBlockStyle, SheetPainter,
    VirtualLocation, Viewport,
};

pub const WHITE: u32 = 0xFFFFFFFF;

pub fn style(heights: &[i32], widths: &[i32]) -> Rc<SheetBlockStyle> {
    Rc::new(SheetBlockStyle::uniform(heights, widths).unwrap())
}

/// Three visible virtual rows, each one block of 2×1 physical cells,
/// 20px tall and 100px wide
pub fn three_row_sheet() -> Sheet {
    let s = style(&[20, 20], &[100]);
    Sheet::single_column((0..3).map(|_| (Rc::clone(&s), true)))
}

/// A ledger-shaped register: a one-row header, then `transactions` blocks of
/// two physical rows (date/description/deposit/withdrawal over a split line)
pub fn ledger_sheet(transactions: usize) -> Sheet {
    let header = Rc::new(SheetBlockStyle::new(&[20], &[vec![80, 300, 130, 130]]).unwrap());
    let txn = Rc::new(
        SheetBlockStyle::new(
            &[20, 20],
            &[vec![80, 300, 130, 130], vec![80, 300, 260]],
        )
        .unwrap(),
    );
    let rows = std::iter::once((header, true))
        .chain((0..transactions).map(|_| (Rc::clone(&txn), true)));
    Sheet::single_column(rows)
}

/// One text draw request
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub style: FontStyle,
}

/// Text shaper with fixed-width glyphs that records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingShaper {
    pub char_width: i32,
    pub calls: Vec<DrawCall>,
}

impl RecordingShaper {
    pub fn new() -> Self {
        Self {
            char_width: 8,
            calls: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.text.as_str()).collect()
    }
}

impl TextShaper for RecordingShaper {
    fn measure(&mut self, text: &str, _style: FontStyle) -> i32 {
        text.chars().count() as i32 * self.char_width
    }

    fn draw(
        &mut self,
        _frame: &mut Frame,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        style: FontStyle,
    ) {
        self.calls.push(DrawCall {
            text: text.to_string(),
            x,
            y,
            color,
            style,
        });
    }
}

/// Wraps a table and records every location whose entry text was requested.
/// The renderer asks for entry text exactly once per painted cell.
pub struct RecordingTable<'a, T: TableModel> {
    inner: &'a T,
    pub entries: RefCell<Vec<VirtualLocation>>,
}

impl<'a, T: TableModel> RecordingTable<'a, T> {
    pub fn new(inner: &'a T) -> Self {
        Self {
            inner,
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn painted(&self) -> Vec<VirtualLocation> {
        self.entries.borrow().clone()
    }

    pub fn painted_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.entries.borrow().iter().map(|l| l.virt_row()).collect();
        rows.dedup();
        rows
    }
}

impl<T: TableModel> TableModel for RecordingTable<'_, T> {
    fn entry(&self, loc: VirtualLocation) -> Cow<'_, str> {
        self.entries.borrow_mut().push(loc);
        self.inner.entry(loc)
    }

    fn label(&self, loc: VirtualLocation) -> Cow<'_, str> {
        self.inner.label(loc)
    }

    fn alignment(&self, loc: VirtualLocation) -> CellAlignment {
        self.inner.alignment(loc)
    }

    fn fg_color(&self, loc: VirtualLocation) -> Color {
        self.inner.fg_color(loc)
    }

    fn bg_color(&self, loc: VirtualLocation) -> CellBackground {
        self.inner.bg_color(loc)
    }

    fn theme_fg_color(&self, loc: VirtualLocation) -> ColorCategory {
        self.inner.theme_fg_color(loc)
    }

    fn theme_bg_color(&self, loc: VirtualLocation) -> ThemedBackground {
        self.inner.theme_bg_color(loc)
    }

    fn borders(&self, loc: VirtualLocation) -> PhysicalCellBorders {
        self.inner.borders(loc)
    }

    fn dividers(&self) -> DividerRows {
        self.inner.dividers()
    }

    fn active_virt_row(&self) -> Option<usize> {
        self.inner.active_virt_row()
    }

    fn move_vertical(&self, loc: VirtualLocation, delta: isize) -> Option<VirtualLocation> {
        self.inner.move_vertical(loc, delta)
    }

    fn is_addressable(&self, loc: VirtualLocation) -> bool {
        self.inner.is_addressable(loc)
    }
}

/// Result of rendering into a fresh buffer
pub struct Rendered {
    pub drawn: bool,
    pub buffer: Vec<u32>,
    pub width: usize,
}

impl Rendered {
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.buffer[y * self.width + x]
    }
}

/// Render `sheet`/`table` into a `viewport`-sized buffer cleared to zero
pub fn render(
    sheet: &Sheet,
    table: &dyn TableModel,
    options: RenderOptions,
    viewport: Viewport,
    shaper: &mut dyn TextShaper,
) -> Rendered {
    let theme = RegisterTheme::default();
    let width = viewport.width.max(0) as usize;
    let height = viewport.height.max(0) as usize;
    let mut buffer = vec![0u32; width * height];
    let drawn = {
        let mut frame = Frame::new(&mut buffer, width, height);
        let painter = SheetPainter::new(sheet, table, &theme, options);
        painter.render_visible(&mut frame, shaper, viewport)
    };
    Rendered {
        drawn,
        buffer,
        width,
    }
}

/// A memory table for `sheet` where every cell's entry names its location
pub fn labelled_table(sheet: &Sheet) -> MemoryTable {
    let mut table = MemoryTable::from_sheet(sheet);
    for virt_row in 0..sheet.num_virt_rows() {
        let Some(style) = sheet
            .block(regsheet::VirtualCellLocation::new(virt_row, 0))
            .and_then(|b| b.style())
        else {
            continue;
        };
        for r in 0..style.nrows() {
            for c in 0..style.ncols() {
                let loc = VirtualLocation::new(virt_row, 0, r, c);
                table.cell_mut(loc).entry = format!("{}.{}.{}", virt_row, r, c);
            }
        }
    }
    table
}
