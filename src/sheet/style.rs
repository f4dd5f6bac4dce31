//! Block styles: shared pixel layout for every block of the same shape

use super::LayoutError;

/// Pixel geometry of one physical cell, relative to its block's origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellDimensions {
    pub origin_x: i32,
    pub origin_y: i32,
    pub pixel_width: i32,
    pub pixel_height: i32,
}

impl CellDimensions {
    #[inline]
    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.origin_x && x < self.origin_x + self.pixel_width
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.origin_y && y < self.origin_y + self.pixel_height
    }
}

/// Layout descriptor shared by all blocks with identical shape.
///
/// Cells within a physical row are contiguous and ascend left to right;
/// rows are contiguous and ascend top to bottom. A physical row may split its
/// width into fewer columns than `ncols`; the missing cells have zero width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetBlockStyle {
    nrows: usize,
    ncols: usize,
    /// Row-major, `nrows * ncols` entries
    dimensions: Vec<CellDimensions>,
    width: i32,
    height: i32,
}

impl SheetBlockStyle {
    /// Build a style from per-row heights and per-row column widths.
    pub fn new(row_heights: &[i32], col_widths: &[Vec<i32>]) -> Result<Self, LayoutError> {
        if row_heights.is_empty() {
            return Err(LayoutError::EmptyStyle);
        }
        if row_heights.len() != col_widths.len() {
            return Err(LayoutError::RowCountMismatch {
                heights: row_heights.len(),
                widths: col_widths.len(),
            });
        }

        let ncols = col_widths.iter().map(Vec::len).max().unwrap_or(0);
        if ncols == 0 {
            return Err(LayoutError::EmptyStyle);
        }

        let nrows = row_heights.len();
        let mut dimensions = Vec::with_capacity(nrows * ncols);
        let mut origin_y = 0;
        let mut width = 0;

        for (row, (&pixel_height, widths)) in row_heights.iter().zip(col_widths).enumerate() {
            if pixel_height < 0 {
                return Err(LayoutError::NegativeDimension { row, col: None });
            }

            let mut origin_x = 0;
            for col in 0..ncols {
                let pixel_width = widths.get(col).copied().unwrap_or(0);
                if pixel_width < 0 {
                    return Err(LayoutError::NegativeDimension {
                        row,
                        col: Some(col),
                    });
                }
                dimensions.push(CellDimensions {
                    origin_x,
                    origin_y,
                    pixel_width,
                    pixel_height,
                });
                origin_x += pixel_width;
            }

            width = width.max(origin_x);
            origin_y += pixel_height;
        }

        Ok(Self {
            nrows,
            ncols,
            dimensions,
            width,
            height: origin_y,
        })
    }

    /// Every physical row uses the same column widths
    pub fn uniform(row_heights: &[i32], col_widths: &[i32]) -> Result<Self, LayoutError> {
        let rows = vec![col_widths.to_vec(); row_heights.len()];
        Self::new(row_heights, &rows)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Total block width in pixels (widest physical row)
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Total block height in pixels
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_dimensions(&self, row: usize, col: usize) -> Option<&CellDimensions> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.dimensions.get(row * self.ncols + col)
    }

    /// Whether (row, col) addresses a cell of this style
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.nrows && col < self.ncols
    }
}
