//! Display-scaled viewport math for interactive grids.
//!
//! The browser canvas shows the source image scaled down to fit a fixed
//! display box, then draws the hex grid over it and maps clicks back to axial
//! coordinates. This module is the canonical version of that math: one scale
//! factor, derived once from the recorded image dimensions, applied
//! symmetrically to drawing and hit-testing so both stay consistent with the
//! server-side transforms in [`crate::axial`].

use serde::{Deserialize, Serialize};

use crate::axial::{hex_to_pixel, pixel_to_hex, AxialCoord, PixelPoint, HEX_HEIGHT, HEX_SIZE};

/// Default display box the original image is fitted into.
pub const DEFAULT_DISPLAY_WIDTH: f64 = 800.0;
pub const DEFAULT_DISPLAY_HEIGHT: f64 = 600.0;

/// A uniform-scale view of a source image inside a display box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Uniform scale from image pixels to display pixels.
    pub scale: f64,
}

impl Viewport {
    /// Fit an image into a display box, preserving aspect ratio.
    pub fn fit(image_width: u32, image_height: u32, max_width: f64, max_height: f64) -> Self {
        let scale = (max_width / image_width as f64).min(max_height / image_height as f64);
        Self {
            image_width,
            image_height,
            scale,
        }
    }

    /// Fit into the default 800x600 display box.
    pub fn fit_default(image_width: u32, image_height: u32) -> Self {
        Self::fit(
            image_width,
            image_height,
            DEFAULT_DISPLAY_WIDTH,
            DEFAULT_DISPLAY_HEIGHT,
        )
    }

    /// Scaled display width.
    pub fn display_width(&self) -> f64 {
        self.image_width as f64 * self.scale
    }

    /// Scaled display height.
    pub fn display_height(&self) -> f64 {
        self.image_height as f64 * self.scale
    }

    /// Hex circumradius in display pixels.
    pub fn display_hex_size(&self) -> f64 {
        HEX_SIZE * self.scale
    }

    /// Map a click in display coordinates to the axial cell under it.
    ///
    /// Unscales to source-image pixels first, so the result is identical to
    /// what the server computes for the same image position.
    pub fn click_to_hex(&self, display_x: f64, display_y: f64) -> AxialCoord {
        pixel_to_hex(display_x / self.scale, display_y / self.scale)
    }

    /// Center of a hex in display coordinates.
    pub fn hex_display_center(&self, q: i32, r: i32) -> PixelPoint {
        let p = hex_to_pixel(q, r);
        PixelPoint::new(p.x * self.scale, p.y * self.scale)
    }

    /// Enumerate the hexes whose centers land within the display box, with a
    /// one-hex margin so partially visible cells at the edges are included.
    pub fn visible_hexes(&self) -> Vec<AxialCoord> {
        let max_q = (self.image_width as f64 / (HEX_SIZE * 1.5)).ceil() as i32 + 2;
        let max_r = (self.image_height as f64 / HEX_HEIGHT).ceil() as i32 + 2;
        let (w, h) = (self.display_width(), self.display_height());
        let margin = self.display_hex_size();

        let mut out = Vec::new();
        for q in -2..=max_q {
            for r in -2..=max_r {
                let c = self.hex_display_center(q, r);
                if c.x >= -margin && c.x <= w + margin && c.y >= -margin && c.y <= h + margin {
                    out.push(AxialCoord::new(q, r));
                }
            }
        }
        out
    }
}
