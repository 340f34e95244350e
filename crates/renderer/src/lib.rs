//! Hex region extraction and grid-view rendering.
//!
//! Produces PNG bytes from a source raster image:
//! - hex-shaped cutouts (transparent outside the cell boundary)
//! - grid-context views (neighborhood outlines drawn over a crop)
//!
//! Every operation is pure per call: no caching, no shared state, and
//! byte-identical output for identical input.

pub mod composite;
pub mod extract;
pub mod grid_view;
pub mod png;

pub use extract::extract_hex_region;
pub use grid_view::{generate_grid_view, generate_grid_view_with, GridViewConfig};
