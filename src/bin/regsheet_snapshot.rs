//! Snapshot generator for register grids
//!
//! Renders a register described by a YAML scenario into a PNG, headless.
//!
//! Usage:
//!   cargo run --bin regsheet-snapshot -- --scenario scenarios/basic.yaml
//!   cargo run --bin regsheet-snapshot -- --scenario scenarios/basic.yaml \
//!       --font /usr/share/fonts/TTF/DejaVuSans.ttf --out out/basic.png

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use regsheet::render::{CursorGeometry, FontShaper, FontStyle, Frame, TextShaper, Viewport};
use regsheet::table::{
    BorderSeverity, CellAlignment, CellSpec, ColorCategory, DividerRows, PhysicalCellBorders,
};
use regsheet::{
    Color, MemoryTable, RegisterConfig, RegisterTheme, RenderOptions, Sheet, SheetBlockStyle,
    SheetPainter, VirtualCellLocation, VirtualLocation,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "regsheet-snapshot", about = "Render a register scenario to PNG")]
struct Args {
    /// Path to the scenario YAML file
    #[arg(long)]
    scenario: PathBuf,
    /// Output PNG path (defaults to snapshot-<name>.png)
    #[arg(long)]
    out: Option<PathBuf>,
    /// TTF/OTF font for cell text; text is skipped without one
    #[arg(long)]
    font: Option<PathBuf>,
    /// Italic face for placeholder labels (regular face is slanted otherwise)
    #[arg(long)]
    italic_font: Option<PathBuf>,
    /// Config file (defaults to the user config)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Scenario YAML schema
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct Scenario {
    name: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default)]
    scroll: ScrollPos,
    #[serde(default)]
    theme: Option<String>,
    styles: HashMap<String, ScenarioStyle>,
    /// Content applied to every cell before per-cell overrides
    #[serde(default)]
    defaults: ScenarioCell,
    rows: Vec<ScenarioRow>,
    #[serde(default)]
    dividers: ScenarioDividers,
    #[serde(default)]
    active_row: Option<usize>,
    #[serde(default)]
    cursor: Option<ScenarioCursor>,
}

#[derive(Deserialize, Debug, Default)]
struct ScrollPos {
    x: i32,
    y: i32,
}

#[derive(Deserialize, Debug)]
struct ScenarioStyle {
    heights: Vec<i32>,
    widths: Vec<Vec<i32>>,
}

#[derive(Deserialize, Debug)]
struct ScenarioRow {
    style: String,
    #[serde(default = "default_visible")]
    visible: bool,
    /// `cells[phys_row][phys_col]`
    #[serde(default)]
    cells: Vec<Vec<ScenarioCell>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct ScenarioCell {
    entry: Option<String>,
    label: Option<String>,
    align: Option<CellAlignment>,
    fg: Option<String>,
    bg: Option<String>,
    fg_category: Option<ColorCategory>,
    bg_category: Option<ColorCategory>,
    hatching: Option<bool>,
    /// Same severity on all four edges
    border: Option<BorderSeverity>,
    borders: Option<PhysicalCellBorders>,
    addressable: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct ScenarioDividers {
    row: i32,
    upper: i32,
    lower: i32,
}

impl Default for ScenarioDividers {
    fn default() -> Self {
        Self {
            row: -1,
            upper: -1,
            lower: -1,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ScenarioCursor {
    row: usize,
    #[serde(default)]
    phys_row: usize,
    #[serde(default)]
    phys_col: usize,
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    360
}
fn default_visible() -> bool {
    true
}

impl ScenarioCell {
    /// Overlay this cell's fields onto `base`
    fn apply(&self, base: &CellSpec) -> Result<CellSpec> {
        let mut spec = base.clone();
        if let Some(entry) = &self.entry {
            spec.entry = entry.clone();
        }
        if let Some(label) = &self.label {
            spec.label = label.clone();
        }
        if let Some(align) = self.align {
            spec.alignment = align;
        }
        if let Some(fg) = &self.fg {
            spec.fg_color = parse_color(fg)?;
        }
        if let Some(bg) = &self.bg {
            spec.bg_color = parse_color(bg)?;
        }
        if let Some(category) = self.fg_category {
            spec.fg_category = category;
        }
        if let Some(category) = self.bg_category {
            spec.bg_category = category;
        }
        if let Some(hatching) = self.hatching {
            spec.hatching = hatching;
        }
        if let Some(severity) = self.border {
            spec.borders = PhysicalCellBorders::uniform(severity);
        }
        if let Some(borders) = self.borders {
            spec.borders = borders;
        }
        if let Some(addressable) = self.addressable {
            spec.addressable = addressable;
        }
        Ok(spec)
    }
}

fn parse_color(hex: &str) -> Result<Color> {
    Color::from_hex(hex).map_err(|e| anyhow::anyhow!("bad color {:?}: {}", hex, e))
}

// ---------------------------------------------------------------------------
// Model creation
// ---------------------------------------------------------------------------

fn build_sheet(scenario: &Scenario) -> Result<Sheet> {
    let mut styles: HashMap<&str, Rc<SheetBlockStyle>> = HashMap::new();
    for (name, style) in &scenario.styles {
        let built = SheetBlockStyle::new(&style.heights, &style.widths)
            .with_context(|| format!("style {:?}", name))?;
        styles.insert(name.as_str(), Rc::new(built));
    }

    let mut sheet = Sheet::new(scenario.rows.len(), 1);
    for (virt_row, row) in scenario.rows.iter().enumerate() {
        let style = styles
            .get(row.style.as_str())
            .with_context(|| format!("row {} uses unknown style {:?}", virt_row, row.style))?;
        sheet.set_block(
            VirtualCellLocation::new(virt_row, 0),
            Rc::clone(style),
            row.visible,
        )?;
    }
    sheet.compute_origins();
    Ok(sheet)
}

fn build_table(scenario: &Scenario, sheet: &Sheet) -> Result<MemoryTable> {
    let mut table = MemoryTable::from_sheet(sheet);
    table.default_cell = scenario.defaults.apply(&CellSpec::default())?;
    table.dividers = DividerRows {
        row: scenario.dividers.row,
        upper: scenario.dividers.upper,
        lower: scenario.dividers.lower,
    };
    table.active_virt_row = scenario.active_row;

    for (virt_row, row) in scenario.rows.iter().enumerate() {
        for (phys_row, cells) in row.cells.iter().enumerate() {
            for (phys_col, cell) in cells.iter().enumerate() {
                let loc = VirtualLocation::new(virt_row, 0, phys_row, phys_col);
                let spec = cell
                    .apply(&table.default_cell)
                    .with_context(|| format!("cell {:?}", loc))?;
                table.set_cell(loc, spec);
            }
        }
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Stand-in when no font was given: measures nothing, draws nothing
struct NoText;

impl TextShaper for NoText {
    fn measure(&mut self, _text: &str, _style: FontStyle) -> i32 {
        0
    }

    fn draw(&mut self, _: &mut Frame, _: i32, _: i32, _: &str, _: Color, _: FontStyle) {}
}

fn load_shaper(args: &Args, font_size: f32) -> Result<Box<dyn TextShaper>> {
    let Some(font_path) = &args.font else {
        tracing::info!("No --font given, cell text will be skipped");
        return Ok(Box::new(NoText));
    };
    let regular = std::fs::read(font_path)
        .with_context(|| format!("reading font {}", font_path.display()))?;
    let italic = args
        .italic_font
        .as_ref()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))
        })
        .transpose()?;
    Ok(Box::new(FontShaper::from_bytes(
        &regular,
        italic.as_deref(),
        font_size,
    )?))
}

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

fn save_png(buffer: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    // Convert ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width, height, rgba)
        .context("failed to create image buffer")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    regsheet::tracing::init(args.log_dir.as_deref());

    let config = match &args.config {
        Some(path) => RegisterConfig::load_from(path)?,
        None => RegisterConfig::load(),
    };

    let content = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading {}", args.scenario.display()))?;
    let scenario: Scenario = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing {}", args.scenario.display()))?;

    let theme_id = scenario.theme.as_deref().unwrap_or(&config.theme);
    let theme = regsheet::theme::load_theme(theme_id).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using default", theme_id, e);
        RegisterTheme::default()
    });

    let sheet = build_sheet(&scenario)?;
    let table = build_table(&scenario, &sheet)?;
    let mut shaper = load_shaper(&args, config.font_size)?;

    let width = scenario.width as usize;
    let height = scenario.height as usize;
    let viewport = Viewport::new(
        scenario.scroll.x,
        scenario.scroll.y,
        scenario.width as i32,
        scenario.height as i32,
    );

    let mut buffer = vec![0xFFFFFFFF_u32; width * height];
    {
        let mut frame = Frame::new(&mut buffer, width, height);
        let painter = SheetPainter::new(&sheet, &table, &theme, RenderOptions::from(&config));

        if !painter.render_visible(&mut frame, shaper.as_mut(), viewport) {
            tracing::warn!("Nothing drawn for scenario {}", scenario.name);
        }

        if let Some(cursor) = &scenario.cursor {
            let loc = VirtualLocation::new(cursor.row, 0, cursor.phys_row, cursor.phys_col);
            match CursorGeometry::for_location(&sheet, loc) {
                Some(geometry) => painter.render_cursor(&mut frame, &geometry, viewport),
                None => tracing::warn!("Cursor location {:?} is outside the sheet", loc),
            }
        }
    }

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("snapshot-{}.png", scenario.name)));
    save_png(&buffer, scenario.width, scenario.height, &out_path)?;
    tracing::info!("Saved {}", out_path.display());
    eprintln!("saved {}", out_path.display());
    Ok(())
}
