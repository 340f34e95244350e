//! Common types and geometry shared across all hexmap services.
//!
//! Everything that must agree between the interactive viewport and the
//! server-side extraction path lives here: the axial coordinate transform,
//! the hex vertex/bounding-box geometry, and the single `HEX_SIZE` constant
//! both sides are required to use.

pub mod axial;
pub mod error;
pub mod geometry;
pub mod viewport;

pub use axial::{AxialCoord, GridDimensions, PixelPoint, HEX_HEIGHT, HEX_SIZE, HEX_WIDTH};
pub use error::{HexError, HexResult};
pub use geometry::{bounding_box, hex_vertices, point_in_hex, BoundingBox};
pub use viewport::Viewport;
