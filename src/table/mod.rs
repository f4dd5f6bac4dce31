//! Table model seam
//!
//! The register grid only knows geometry. Everything about a cell's content
//! (text, colors, borders) and about row navigation comes from a table model
//! through the narrow [`TableModel`] trait.

mod memory;

use std::borrow::Cow;

use serde::Deserialize;

pub use memory::{CellSpec, MemoryTable};

use crate::sheet::VirtualLocation;
use crate::theme::Color;

/// Strength of a cell-edge line, ranked for merging with neighbours.
///
/// `Normal` and `Heavy` render identically but are distinct ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderSeverity {
    #[default]
    None = 0,
    Light = 1,
    Normal = 2,
    Heavy = 3,
    Highlight = 4,
}

impl BorderSeverity {
    /// Merge rank: None < Light < Normal < Heavy < Highlight
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Decode a rank handed out by a model; unknown ranks yield `None`
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::None),
            1 => Some(Self::Light),
            2 => Some(Self::Normal),
            3 => Some(Self::Heavy),
            4 => Some(Self::Highlight),
            _ => None,
        }
    }

    /// The stronger of two severities
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

/// Line severities for the four edges of a physical cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhysicalCellBorders {
    pub top: BorderSeverity,
    pub bottom: BorderSeverity,
    pub left: BorderSeverity,
    pub right: BorderSeverity,
}

impl PhysicalCellBorders {
    pub const fn uniform(severity: BorderSeverity) -> Self {
        Self {
            top: severity,
            bottom: severity,
            left: severity,
            right: severity,
        }
    }
}

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellAlignment {
    #[default]
    Left,
    Right,
    Center,
}

/// Raw background color plus the hatching flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBackground {
    pub color: Color,
    pub hatching: bool,
}

/// Theme color category plus the hatching flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemedBackground {
    pub category: ColorCategory,
    pub hatching: bool,
}

/// Theme color categories a model can ask for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    #[default]
    Undefined,
    Header,
    Primary,
    PrimaryActive,
    Secondary,
    SecondaryActive,
    Split,
    SplitActive,
    Negative,
}

impl ColorCategory {
    pub const COUNT: usize = 9;

    pub const ALL: [ColorCategory; Self::COUNT] = [
        ColorCategory::Undefined,
        ColorCategory::Header,
        ColorCategory::Primary,
        ColorCategory::PrimaryActive,
        ColorCategory::Secondary,
        ColorCategory::SecondaryActive,
        ColorCategory::Split,
        ColorCategory::SplitActive,
        ColorCategory::Negative,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Virtual-row indices of the heavier divider rules. A negative index
/// disables that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerRows {
    /// Blue rule
    pub row: i32,
    /// Red rule; rows above it are read-only
    pub upper: i32,
    /// Blue rule
    pub lower: i32,
}

impl DividerRows {
    pub const NONE: Self = Self {
        row: -1,
        upper: -1,
        lower: -1,
    };
}

impl Default for DividerRows {
    fn default() -> Self {
        Self::NONE
    }
}

/// Content and navigation queries the renderer makes against the ledger.
///
/// All methods are read-only; the renderer never mutates the model.
pub trait TableModel {
    /// Entry text of a cell (may be empty)
    fn entry(&self, loc: VirtualLocation) -> Cow<'_, str>;

    /// Placeholder label shown for empty cells of the active row
    fn label(&self, loc: VirtualLocation) -> Cow<'_, str>;

    fn alignment(&self, loc: VirtualLocation) -> CellAlignment;

    /// Raw foreground color
    fn fg_color(&self, loc: VirtualLocation) -> Color;

    /// Raw background color and hatching flag
    fn bg_color(&self, loc: VirtualLocation) -> CellBackground;

    /// Theme category for the foreground
    fn theme_fg_color(&self, _loc: VirtualLocation) -> ColorCategory {
        ColorCategory::Primary
    }

    /// Theme category for the background, and the hatching flag
    fn theme_bg_color(&self, loc: VirtualLocation) -> ThemedBackground {
        ThemedBackground {
            category: ColorCategory::Primary,
            hatching: self.bg_color(loc).hatching,
        }
    }

    /// The cell's own border severities, before merging with neighbours
    fn borders(&self, loc: VirtualLocation) -> PhysicalCellBorders;

    fn dividers(&self) -> DividerRows;

    /// Virtual row of the currently open entry, if any
    fn active_virt_row(&self) -> Option<usize>;

    /// Move `delta` effective rows up (negative) or down (positive).
    ///
    /// May cross block and virtual-row boundaries and skip rows that are
    /// hidden or not addressable. `None` when no such row exists.
    fn move_vertical(&self, loc: VirtualLocation, delta: isize) -> Option<VirtualLocation>;

    /// Whether a location names a real, visible cell
    fn is_addressable(&self, loc: VirtualLocation) -> bool;
}
