//! Register grid model
//!
//! A two-level grid: virtual rows/columns address blocks, and each block is a
//! small physical grid whose pixel layout comes from a shared style.
//!
//! ```text
//! Sheet
//! └── SheetBlock (virt_row, virt_col)   origin_x/origin_y, visible
//!     └── Rc<SheetBlockStyle>           nrows × ncols CellDimensions
//! ```

mod block;
mod locate;
mod location;
mod style;

pub use block::{Sheet, SheetBlock};
pub use location::{VirtualCellLocation, VirtualLocation};
pub use style::{CellDimensions, SheetBlockStyle};

/// Integer pixel rectangle (half-open on both axes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Errors raised while building styles or the block grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A style needs at least one row and one column
    EmptyStyle,
    /// Row heights and per-row column widths disagree in length
    RowCountMismatch { heights: usize, widths: usize },
    /// A height (col = None) or width was negative
    NegativeDimension { row: usize, col: Option<usize> },
    /// Block address outside the virtual grid
    BlockOutOfRange(VirtualCellLocation),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::EmptyStyle => write!(f, "block style has no cells"),
            LayoutError::RowCountMismatch { heights, widths } => write!(
                f,
                "block style has {} row heights but {} rows of widths",
                heights, widths
            ),
            LayoutError::NegativeDimension { row, col: None } => {
                write!(f, "negative height for physical row {}", row)
            }
            LayoutError::NegativeDimension {
                row,
                col: Some(col),
            } => write!(f, "negative width for physical cell ({}, {})", row, col),
            LayoutError::BlockOutOfRange(loc) => write!(
                f,
                "block ({}, {}) is outside the virtual grid",
                loc.virt_row, loc.virt_col
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
