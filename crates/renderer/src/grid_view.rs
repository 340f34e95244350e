//! Grid-context view rendering.
//!
//! Crops the source image around a center hex and draws a small neighborhood
//! of hex outlines over it, with the center cell highlighted. Purely a
//! visualization aid: deterministic, no stored state.

use hex_common::axial::{hex_to_pixel, HEX_SIZE};
use hex_common::{HexError, HexResult};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::composite::blend_over;
use crate::png;

/// Side length of the sentinel returned for out-of-bounds centers.
const SENTINEL_SIZE: usize = 300;

/// How far past the center hex the crop extends, in pixels.
const GRID_EXTENT: f64 = HEX_SIZE * 2.5;

/// Neighborhood size for the overlay.
#[derive(Debug, Clone, Copy)]
pub struct GridViewConfig {
    /// Odd number of hexes per axis around the center (3 = a 3x3 window).
    pub grid_size: u32,
}

impl Default for GridViewConfig {
    fn default() -> Self {
        Self { grid_size: 3 }
    }
}

impl GridViewConfig {
    pub fn new(grid_size: u32) -> HexResult<Self> {
        if grid_size == 0 || grid_size % 2 == 0 {
            return Err(HexError::InvalidParameter {
                param: "grid_size".to_string(),
                message: format!("must be odd and non-zero, got {}", grid_size),
            });
        }
        Ok(Self { grid_size })
    }

    fn half(&self) -> i32 {
        (self.grid_size / 2) as i32
    }
}

/// Render the default 3x3 grid view around `(center_q, center_r)`.
pub fn generate_grid_view(
    source: &[u8],
    center_q: i32,
    center_r: i32,
    image_width: u32,
    image_height: u32,
) -> HexResult<Vec<u8>> {
    generate_grid_view_with(
        source,
        center_q,
        center_r,
        image_width,
        image_height,
        &GridViewConfig::default(),
    )
}

/// Render a grid view with an explicit neighborhood size.
pub fn generate_grid_view_with(
    source: &[u8],
    center_q: i32,
    center_r: i32,
    image_width: u32,
    image_height: u32,
    config: &GridViewConfig,
) -> HexResult<Vec<u8>> {
    let center = hex_to_pixel(center_q, center_r);

    let min_x = (center.x - GRID_EXTENT).max(0.0);
    let max_x = (center.x + GRID_EXTENT).min(image_width as f64);
    let min_y = (center.y - GRID_EXTENT).max(0.0);
    let max_y = (center.y + GRID_EXTENT).min(image_height as f64);

    let width = (max_x - min_x).floor() as i64;
    let height = (max_y - min_y).floor() as i64;

    if width <= 0 || height <= 0 {
        return gray_sentinel();
    }

    let decoded = image::load_from_memory(source)
        .map_err(|e| HexError::SourceImageUnavailable(e.to_string()))?;

    let crop = decoded
        .crop_imm(
            min_x.floor() as u32,
            min_y.floor() as u32,
            width as u32,
            height as u32,
        )
        .to_rgba8();

    let overlay = render_overlay(
        width as u32,
        height as u32,
        center_q,
        center_r,
        min_x,
        min_y,
        config,
    )?;

    let (w, h) = (crop.width() as usize, crop.height() as usize);
    let mut pixels = crop.into_raw();
    blend_over(&mut pixels, &overlay, w);

    png::encode_auto(&pixels, w, h)
}

/// Fixed opaque gray sentinel for out-of-bounds centers.
fn gray_sentinel() -> HexResult<Vec<u8>> {
    let palette = [(100u8, 100u8, 100u8, 255u8)];
    let indices = vec![0u8; SENTINEL_SIZE * SENTINEL_SIZE];
    png::encode_indexed(SENTINEL_SIZE, SENTINEL_SIZE, &palette, &indices)
}

/// Draw the neighborhood outlines into a straight-alpha RGBA buffer.
fn render_overlay(
    width: u32,
    height: u32,
    center_q: i32,
    center_r: i32,
    offset_x: f64,
    offset_y: f64,
    config: &GridViewConfig,
) -> HexResult<Vec<u8>> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        HexError::EncodingFailure(format!(
            "overlay pixmap allocation failed ({}x{})",
            width, height
        ))
    })?;

    let half = config.half();
    for q_offset in -half..=half {
        for r_offset in -half..=half {
            let q = center_q + q_offset;
            let r = center_r + r_offset;
            let c = hex_to_pixel(q, r);
            let cx = c.x - offset_x;
            let cy = c.y - offset_y;

            // Skip hexes entirely outside the crop (one-hex margin).
            if cx < -HEX_SIZE
                || cx > width as f64 + HEX_SIZE
                || cy < -HEX_SIZE
                || cy > height as f64 + HEX_SIZE
            {
                continue;
            }

            let path = hex_path(cx, cy)?;
            let is_center = q_offset == 0 && r_offset == 0;

            if is_center {
                // 20% red fill, heavy red outline, dot at the exact center.
                let mut fill = Paint::default();
                fill.set_color_rgba8(255, 0, 0, 51);
                fill.anti_alias = true;
                pixmap.fill_path(&path, &fill, FillRule::Winding, Transform::identity(), None);

                let mut stroke_paint = Paint::default();
                stroke_paint.set_color_rgba8(255, 0, 0, 255);
                stroke_paint.anti_alias = true;
                let stroke = Stroke {
                    width: 4.0,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);

                draw_center_dot(&mut pixmap, cx, cy)?;
            } else {
                let mut stroke_paint = Paint::default();
                stroke_paint.set_color_rgba8(0, 255, 0, 255);
                stroke_paint.anti_alias = true;
                let stroke = Stroke {
                    width: 2.0,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
            }
        }
    }

    Ok(demultiply(&pixmap))
}

/// Closed path through the six vertices of a hex centered at `(cx, cy)`.
fn hex_path(cx: f64, cy: f64) -> HexResult<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for i in 0..6 {
        let angle = std::f64::consts::FRAC_PI_3 * i as f64;
        let x = (cx + HEX_SIZE * angle.cos()) as f32;
        let y = (cy + HEX_SIZE * angle.sin()) as f32;
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
        .ok_or_else(|| HexError::EncodingFailure("hex outline path construction failed".to_string()))
}

/// Red dot with a white ring marking the highlighted center.
fn draw_center_dot(pixmap: &mut Pixmap, cx: f64, cy: f64) -> HexResult<()> {
    let circle = PathBuilder::from_circle(cx as f32, cy as f32, 5.0).ok_or_else(|| {
        HexError::EncodingFailure("center dot path construction failed".to_string())
    })?;

    let mut fill = Paint::default();
    fill.set_color_rgba8(255, 0, 0, 255);
    fill.anti_alias = true;
    pixmap.fill_path(&circle, &fill, FillRule::Winding, Transform::identity(), None);

    let mut ring = Paint::default();
    ring.set_color_rgba8(255, 255, 255, 255);
    ring.anti_alias = true;
    let stroke = Stroke {
        width: 2.0,
        ..Stroke::default()
    };
    pixmap.stroke_path(&circle, &ring, &stroke, Transform::identity(), None);
    Ok(())
}

/// Convert a premultiplied tiny-skia pixmap to straight-alpha RGBA bytes.
fn demultiply(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
