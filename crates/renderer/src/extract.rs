//! Hex-shaped region extraction.
//!
//! Cuts one hexagonal cell out of a source image: crop the cell's bounding
//! box, rasterize the hexagon as an aliased alpha mask, stencil, encode PNG.

use hex_common::{bounding_box, hex_vertices, BoundingBox, HexError, HexResult, PixelPoint};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::composite::apply_alpha_stencil;
use crate::png;

/// Side length of the sentinel returned for fully out-of-bounds hexes.
const SENTINEL_SIZE: usize = 100;

/// Extract a hex-shaped cutout of the source image as PNG bytes.
///
/// `image_width`/`image_height` are the previously-recorded dimensions of the
/// source; the hex at `(q, r)` is clipped against them. A hex entirely
/// outside the image yields a fixed 100x100 fully transparent PNG rather
/// than an error. Identical inputs produce byte-identical output.
pub fn extract_hex_region(
    source: &[u8],
    q: i32,
    r: i32,
    image_width: u32,
    image_height: u32,
) -> HexResult<Vec<u8>> {
    let vertices = hex_vertices(q, r);
    let bbox = bounding_box(&vertices, image_width, image_height);

    if bbox.is_empty() {
        return transparent_sentinel();
    }

    let decoded = image::load_from_memory(source)
        .map_err(|e| HexError::SourceImageUnavailable(e.to_string()))?;

    let crop = decoded
        .crop_imm(
            bbox.min_x as u32,
            bbox.min_y as u32,
            bbox.width() as u32,
            bbox.height() as u32,
        )
        .to_rgba8();

    let (width, height) = (crop.width() as usize, crop.height() as usize);
    let mask = rasterize_hex_mask(&vertices, &bbox)?;

    let mut pixels = crop.into_raw();
    apply_alpha_stencil(&mut pixels, &mask, width);

    png::encode_auto(&pixels, width, height)
}

/// Fixed transparent sentinel for out-of-bounds hexes.
fn transparent_sentinel() -> HexResult<Vec<u8>> {
    let palette = [(0u8, 0u8, 0u8, 0u8)];
    let indices = vec![0u8; SENTINEL_SIZE * SENTINEL_SIZE];
    png::encode_indexed(SENTINEL_SIZE, SENTINEL_SIZE, &palette, &indices)
}

/// Rasterize the hexagon, translated into crop space, as a one-byte-per-pixel
/// coverage mask.
///
/// Anti-aliasing is off on purpose: coverage is then exactly "pixel center
/// inside the polygon", which is the contract the masked output is tested
/// against.
fn rasterize_hex_mask(vertices: &[PixelPoint; 6], bbox: &BoundingBox) -> HexResult<Vec<u8>> {
    let width = bbox.width() as u32;
    let height = bbox.height() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        HexError::EncodingFailure(format!("mask pixmap allocation failed ({}x{})", width, height))
    })?;

    let mut pb = PathBuilder::new();
    pb.move_to(
        (vertices[0].x - bbox.min_x as f64) as f32,
        (vertices[0].y - bbox.min_y as f64) as f32,
    );
    for v in &vertices[1..] {
        pb.line_to(
            (v.x - bbox.min_x as f64) as f32,
            (v.y - bbox.min_y as f64) as f32,
        );
    }
    pb.close();
    let path = pb.finish().ok_or_else(|| {
        HexError::EncodingFailure("hex mask path construction failed".to_string())
    })?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = false;

    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    // Opaque white fill: the alpha byte is the coverage mask.
    Ok(pixmap.data().iter().skip(3).step_by(4).copied().collect())
}
