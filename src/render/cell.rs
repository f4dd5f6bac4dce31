//! Painting a single physical cell
//!
//! Order matters: background, border lines, hatching, divider rules, then
//! text on top.

use super::borders::resolve_borders;
use super::frame::Frame;
use super::text::{FontStyle, TextShaper};
use super::SheetPainter;
use crate::config::ReadOnlyRowEffect;
use crate::sheet::{PixelRect, SheetBlockStyle, VirtualLocation};
use crate::table::{BorderSeverity, CellAlignment, PhysicalCellBorders};
use crate::theme::{Color, RegisterTheme};

/// Thickness of a divider rule, centred on the row boundary
const DIVIDER_THICKNESS: i32 = 3;

impl SheetPainter<'_> {
    /// Paint one cell into `rect` (viewport-relative pixels).
    pub(super) fn render_cell(
        &self,
        frame: &mut Frame,
        text: &mut dyn TextShaper,
        style: &SheetBlockStyle,
        loc: VirtualLocation,
        rect: PixelRect,
    ) {
        let read_only = self.is_read_only_row(style, loc);
        let (background, hatching) = self.background(loc, read_only);

        frame.fill_rect(rect, background.to_argb_u32());

        let borders = resolve_borders(self.sheet, self.table, loc);
        draw_borders(frame, self.theme, &borders, background, rect);

        if hatching {
            draw_hatching(frame, self.theme.light_line, rect);
        }

        let dividers = self.table.dividers();
        let nrows = style.nrows();
        for (index, color) in [
            (dividers.upper, self.theme.divider_upper),
            (dividers.row, self.theme.divider_lower),
            (dividers.lower, self.theme.divider_lower),
        ] {
            draw_divider(frame, loc, index, nrows, color, rect);
        }

        self.draw_text(frame, text, loc, rect, read_only);
    }

    /// Last physical row of a block above the upper divider
    fn is_read_only_row(&self, style: &SheetBlockStyle, loc: VirtualLocation) -> bool {
        let upper = self.table.dividers().upper;
        loc.phys_row_offset + 1 == style.nrows()
            && upper >= 0
            && (loc.virt_row() as i64) < i64::from(upper)
    }

    fn background(&self, loc: VirtualLocation, read_only: bool) -> (Color, bool) {
        if self.options.use_theme_colors {
            let themed = self.table.theme_bg_color(loc);
            return (self.theme.background(themed.category), themed.hatching);
        }

        let raw = self.table.bg_color(loc);
        let darken = self.options.read_only_effect == ReadOnlyRowEffect::DarkenBackground;
        let color = if read_only && darken {
            raw.color.darken_10_percent()
        } else {
            raw.color
        };
        (color, raw.hatching)
    }

    fn foreground(&self, loc: VirtualLocation, read_only: bool) -> Color {
        if self.options.use_theme_colors {
            return self.theme.foreground(self.table.theme_fg_color(loc));
        }

        let raw = self.table.fg_color(loc);
        if read_only && self.options.read_only_effect == ReadOnlyRowEffect::LightenForeground {
            raw.lighten_10_percent()
        } else {
            raw
        }
    }

    fn draw_text(
        &self,
        frame: &mut Frame,
        text: &mut dyn TextShaper,
        loc: VirtualLocation,
        rect: PixelRect,
        read_only: bool,
    ) {
        let entry = self.table.entry(loc);
        let is_active_row = self.table.active_virt_row() == Some(loc.virt_row());

        let (content, color, font_style) = if entry.is_empty() {
            if !is_active_row {
                return;
            }
            let label = self.table.label(loc);
            if label.is_empty() {
                return;
            }
            (label, self.theme.placeholder, FontStyle::Italic)
        } else {
            (entry, self.foreground(loc, read_only), FontStyle::Normal)
        };

        let padding = self.options.padding;
        let available = (rect.width - 2 * padding.horizontal).max(0);
        let text_rect = PixelRect::new(
            rect.x + padding.horizontal,
            rect.y + padding.vertical,
            available,
            rect.height - 2,
        );

        let text_width = text.measure(&content, font_style);
        let x_offset = alignment_offset(self.table.alignment(loc), available, text_width);

        frame.set_clip(text_rect);
        text.draw(
            frame,
            text_rect.x + x_offset,
            text_rect.y + 1,
            &content,
            color,
            font_style,
        );
        frame.clear_clip();
    }
}

/// Horizontal text offset inside the padded box. Text wider than the box
/// falls back to left alignment.
pub(super) fn alignment_offset(alignment: CellAlignment, available: i32, text_width: i32) -> i32 {
    if text_width > available {
        return 0;
    }
    match alignment {
        CellAlignment::Left => 0,
        CellAlignment::Right => available - text_width,
        CellAlignment::Center => (available - text_width) / 2,
    }
}

fn line_color(theme: &RegisterTheme, severity: BorderSeverity, background: Color) -> Color {
    match severity {
        BorderSeverity::None => background,
        BorderSeverity::Light => theme.light_line,
        BorderSeverity::Normal | BorderSeverity::Heavy => theme.normal_line,
        BorderSeverity::Highlight => theme.highlight_line,
    }
}

/// Half-open pixel spans of the four border lines. Horizontal spans are
/// column ranges, vertical spans are row ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BorderSpans {
    top: (i32, i32),
    bottom: (i32, i32),
    left: (i32, i32),
    right: (i32, i32),
}

/// Top and bottom own a corner on ties; left and right only take it when
/// strictly stronger.
fn border_spans(b: &PhysicalCellBorders, rect: PixelRect) -> BorderSpans {
    let PixelRect {
        x,
        y,
        width: w,
        height: h,
    } = rect;

    let horizontal = |edge: BorderSeverity| {
        let start = if edge >= b.left { x } else { x + 1 };
        let end = if edge >= b.right { x + w } else { x + w - 1 };
        (start, end)
    };
    let vertical = |edge: BorderSeverity| {
        let start = if edge > b.top { y } else { y + 1 };
        let end = if edge > b.bottom { y + h } else { y + h - 1 };
        (start, end)
    };

    BorderSpans {
        top: horizontal(b.top),
        bottom: horizontal(b.bottom),
        left: vertical(b.left),
        right: vertical(b.right),
    }
}

/// Draw the four edges. The bottom line sits on row `y + h` and the right
/// line on column `x + w`, shared with the neighbouring cells.
fn draw_borders(
    frame: &mut Frame,
    theme: &RegisterTheme,
    b: &PhysicalCellBorders,
    background: Color,
    rect: PixelRect,
) {
    let spans = border_spans(b, rect);
    let color = |severity| line_color(theme, severity, background).to_argb_u32();

    frame.hline(spans.top.0, spans.top.1, rect.y, color(b.top));
    frame.hline(spans.bottom.0, spans.bottom.1, rect.bottom(), color(b.bottom));
    frame.vline(rect.x, spans.left.0, spans.left.1, color(b.left));
    frame.vline(rect.right(), spans.right.0, spans.right.1, color(b.right));
}

/// Small boxed cross near the top-left corner marking a non-editable cell
fn draw_hatching(frame: &mut Frame, color: Color, rect: PixelRect) {
    let size = rect.height / 3 - 1;
    if size <= 0 {
        return;
    }
    let argb = color.to_argb_u32();
    let x0 = rect.x + 2;
    let y0 = rect.y + 2;

    frame.stroke_rect(PixelRect::new(x0, y0, size + 1, size + 1), argb);
    for i in 0..=size {
        frame.set_pixel(x0 + i, y0 + i, argb);
        frame.set_pixel(x0 + i, y0 + size - i, argb);
    }
}

/// Rule at the top of the first physical row of virtual row `index`, or at
/// the bottom of the last physical row of virtual row `index - 1`.
fn draw_divider(
    frame: &mut Frame,
    loc: VirtualLocation,
    index: i32,
    nrows: usize,
    color: Color,
    rect: PixelRect,
) {
    if index < 0 {
        return;
    }
    let virt_row = loc.virt_row() as i64;
    let index = i64::from(index);

    let offset = if loc.phys_row_offset == 0 && virt_row == index {
        0
    } else if loc.phys_row_offset + 1 == nrows && virt_row == index - 1 {
        rect.height
    } else {
        return;
    };

    frame.fill_rect(
        PixelRect::new(rect.x, rect.y + offset - 1, rect.width, DIVIDER_THICKNESS),
        color.to_argb_u32(),
    );
}
