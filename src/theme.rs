//! Register theme
//!
//! YAML-based colors for the register grid: the fixed line palette, divider
//! rules, the cursor outline and the per-category cell colors used when the
//! sheet draws with theme colors instead of raw model colors.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/regsheet/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

use crate::table::ColorCategory;

// Embed theme YAML files at compile time
pub const REGISTER_LIGHT_YAML: &str = include_str!("../themes/register-light.yaml");
pub const REGISTER_DARK_YAML: &str = include_str!("../themes/register-dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "register-light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "register-light",
        yaml: REGISTER_LIGHT_YAML,
    },
    BuiltinTheme {
        id: "register-dark",
        yaml: REGISTER_DARK_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<RegisterTheme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    RegisterTheme::from_yaml(&content)
}

/// Load theme by id or path with priority: explicit path → user → builtin
pub fn load_theme(id: &str) -> Result<RegisterTheme, String> {
    let as_path = Path::new(id);
    if as_path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") && as_path.exists() {
        tracing::info!("Loading theme file {}", as_path.display());
        return from_file(as_path);
    }

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    RegisterTheme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert from a 0xAARRGGBB value. A zero alpha byte is treated as opaque,
    /// since table models commonly hand out plain 0xRRGGBB values.
    pub const fn from_argb_u32(argb: u32) -> Self {
        let a = (argb >> 24) as u8;
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
            a: if a == 0 { 255 } else { a },
        }
    }

    /// Convert to ARGB u32 for the frame buffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Reduce each channel's intensity by 10%: `c * 9 / 10`, truncating
    pub const fn darken_10_percent(&self) -> Self {
        Self {
            r: dec_intensity(self.r, 9, 10),
            g: dec_intensity(self.g, 9, 10),
            b: dec_intensity(self.b, 9, 10),
            a: self.a,
        }
    }

    /// Move each channel 20% of the way towards white:
    /// `0xFF - (0xFF - c) * 8 / 10`, truncating
    pub const fn lighten_10_percent(&self) -> Self {
        Self {
            r: inc_intensity(self.r, 8, 10),
            g: inc_intensity(self.g, 8, 10),
            b: inc_intensity(self.b, 8, 10),
            a: self.a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| -> Result<u8, String> {
            let digits = s
                .get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))?;
            u8::from_str_radix(digits, 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

const fn dec_intensity(byte: u8, numerator: u16, denominator: u16) -> u8 {
    (byte as u16 * numerator / denominator) as u8
}

const fn inc_intensity(byte: u8, numerator: u16, denominator: u16) -> u8 {
    let inverse = (0xFF - byte) as u16;
    0xFF - (inverse * numerator / denominator) as u8
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub lines: LineThemeData,
    pub dividers: DividerThemeData,
    pub cursor: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub colors: CategoryThemeData,
}

/// Border line colors by severity group
#[derive(Debug, Clone, Deserialize)]
pub struct LineThemeData {
    pub light: String,
    pub normal: String,
    pub highlight: String,
}

/// Divider rule colors
#[derive(Debug, Clone, Deserialize)]
pub struct DividerThemeData {
    pub upper: String,
    pub lower: String,
}

/// Background/foreground pair for one color category
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ColorPairData {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
}

/// Per-category colors (all optional, missing entries fall back to `primary`)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CategoryThemeData {
    #[serde(default)]
    pub header: ColorPairData,
    #[serde(default)]
    pub primary: ColorPairData,
    #[serde(default)]
    pub primary_active: ColorPairData,
    #[serde(default)]
    pub secondary: ColorPairData,
    #[serde(default)]
    pub secondary_active: ColorPairData,
    #[serde(default)]
    pub split: ColorPairData,
    #[serde(default)]
    pub split_active: ColorPairData,
    #[serde(default)]
    pub negative: ColorPairData,
}

/// Resolved background/foreground pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub background: Color,
    pub foreground: Color,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct RegisterTheme {
    pub name: String,
    /// Border color for `LIGHT` lines (also hatching)
    pub light_line: Color,
    /// Border color for `NORMAL` and `HEAVY` lines
    pub normal_line: Color,
    /// Border color for `HIGHLIGHT` lines
    pub highlight_line: Color,
    /// Upper divider rule
    pub divider_upper: Color,
    /// Divider and lower divider rules
    pub divider_lower: Color,
    /// Cursor outline
    pub cursor: Color,
    /// Italic placeholder label text
    pub placeholder: Color,
    categories: [ColorPair; ColorCategory::COUNT],
}

impl RegisterTheme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Self::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let light_line = Color::from_hex(&data.lines.light)?;

        let defaults = ColorPair {
            background: Color::rgb(0xFF, 0xFF, 0xFF),
            foreground: Color::rgb(0x00, 0x00, 0x00),
        };
        let primary = resolve_pair(&data.colors.primary, defaults)?;

        let mut categories = [primary; ColorCategory::COUNT];
        for category in ColorCategory::ALL {
            let raw = match category {
                ColorCategory::Undefined | ColorCategory::Primary => continue,
                ColorCategory::Header => &data.colors.header,
                ColorCategory::PrimaryActive => &data.colors.primary_active,
                ColorCategory::Secondary => &data.colors.secondary,
                ColorCategory::SecondaryActive => &data.colors.secondary_active,
                ColorCategory::Split => &data.colors.split,
                ColorCategory::SplitActive => &data.colors.split_active,
                ColorCategory::Negative => &data.colors.negative,
            };
            if let Some(slot) = categories.get_mut(category.index()) {
                *slot = resolve_pair(raw, primary)?;
            }
        }

        Ok(RegisterTheme {
            name: data.name,
            light_line,
            normal_line: Color::from_hex(&data.lines.normal)?,
            highlight_line: Color::from_hex(&data.lines.highlight)?,
            divider_upper: Color::from_hex(&data.dividers.upper)?,
            divider_lower: Color::from_hex(&data.dividers.lower)?,
            cursor: Color::from_hex(&data.cursor)?,
            placeholder: data
                .placeholder
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()?
                .unwrap_or(light_line),
            categories,
        })
    }

    /// Theme colors for a category
    pub fn category(&self, category: ColorCategory) -> ColorPair {
        self.categories
            .get(category.index())
            .copied()
            .unwrap_or(ColorPair {
                background: Color::rgb(0xFF, 0xFF, 0xFF),
                foreground: Color::rgb(0x00, 0x00, 0x00),
            })
    }

    pub fn background(&self, category: ColorCategory) -> Color {
        self.category(category).background
    }

    pub fn foreground(&self, category: ColorCategory) -> Color {
        self.category(category).foreground
    }

    /// Default light register theme (YAML-backed with Rust fallback)
    pub fn default_light() -> Self {
        match Self::from_yaml(REGISTER_LIGHT_YAML) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Builtin register theme failed to parse: {}", e);
                let pair = ColorPair {
                    background: Color::rgb(0xFF, 0xFF, 0xFF),
                    foreground: Color::rgb(0x00, 0x00, 0x00),
                };
                RegisterTheme {
                    name: "Register Light".to_string(),
                    light_line: Color::rgb(0xBF, 0xBF, 0xBF),
                    normal_line: Color::rgb(0x00, 0x00, 0x00),
                    highlight_line: Color::rgb(0xFF, 0x00, 0x00),
                    divider_upper: Color::rgb(0xFF, 0x00, 0x00),
                    divider_lower: Color::rgb(0x00, 0x00, 0xFF),
                    cursor: Color::rgb(0x00, 0x00, 0x00),
                    placeholder: Color::rgb(0xBF, 0xBF, 0xBF),
                    categories: [pair; ColorCategory::COUNT],
                }
            }
        }
    }
}

impl Default for RegisterTheme {
    fn default() -> Self {
        Self::default_light()
    }
}

fn resolve_pair(raw: &ColorPairData, fallback: ColorPair) -> Result<ColorPair, String> {
    Ok(ColorPair {
        background: raw
            .background
            .as_ref()
            .map(|s| Color::from_hex(s))
            .transpose()?
            .unwrap_or(fallback.background),
        foreground: raw
            .foreground
            .as_ref()
            .map(|s| Color::from_hex(s))
            .transpose()?
            .unwrap_or(fallback.foreground),
    })
}
