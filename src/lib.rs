//! regsheet - ledger register grid
//!
//! Geometry, hit-testing and software rendering for a two-level register
//! grid: virtual rows/columns of blocks, each block a small grid of physical
//! cells. Cell content comes from a caller-supplied [`TableModel`].

pub mod config;
pub mod config_paths;
pub mod render;
pub mod sheet;
pub mod table;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::{ReadOnlyRowEffect, RegisterConfig};
pub use render::{Frame, RenderOptions, SheetPainter, TextShaper, Viewport};
pub use sheet::{Sheet, SheetBlock, SheetBlockStyle, VirtualCellLocation, VirtualLocation};
pub use table::{BorderSeverity, MemoryTable, TableModel};
pub use theme::{Color, RegisterTheme};
