//! Hexagon boundary geometry: vertices and clamped bounding boxes.

use serde::{Deserialize, Serialize};

use crate::axial::{hex_to_pixel, PixelPoint, HEX_SIZE};

/// Pixel-space bounding box of a hex, clamped to the image rectangle.
///
/// A hex that lies entirely outside the image clamps to an empty box
/// (`width() <= 0` or `height() <= 0`). That is an expected result, not an
/// error; callers substitute a sentinel image for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl BoundingBox {
    /// Width in pixels. May be zero or negative for fully-clamped boxes.
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Height in pixels. May be zero or negative for fully-clamped boxes.
    pub fn height(&self) -> i64 {
        self.max_y - self.min_y
    }

    /// True when the clamped box contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// The six boundary vertices of the hex at `(q, r)`.
///
/// Vertex `i` sits at `center + HEX_SIZE * (cos(i*60deg), sin(i*60deg))`,
/// with 0 degrees pointing along +x. Every consumer of hex shapes (mask
/// rasterization, overlay strokes, the viewport) must use this same angle
/// convention or the shapes drift apart visually.
pub fn hex_vertices(q: i32, r: i32) -> [PixelPoint; 6] {
    let center = hex_to_pixel(q, r);
    let mut vertices = [PixelPoint::new(0.0, 0.0); 6];
    for (i, v) in vertices.iter_mut().enumerate() {
        let angle = std::f64::consts::FRAC_PI_3 * i as f64;
        *v = PixelPoint::new(
            center.x + HEX_SIZE * angle.cos(),
            center.y + HEX_SIZE * angle.sin(),
        );
    }
    vertices
}

/// Axis-aligned bounding box of a vertex set, clamped to the image bounds.
///
/// Mins are floored and maxes are ceiled before clamping, so the box always
/// covers every partially-touched pixel.
pub fn bounding_box(vertices: &[PixelPoint], image_width: u32, image_height: u32) -> BoundingBox {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for v in vertices {
        min_x = min_x.min(v.x);
        min_y = min_y.min(v.y);
        max_x = max_x.max(v.x);
        max_y = max_y.max(v.y);
    }

    BoundingBox {
        min_x: (min_x.floor() as i64).max(0),
        min_y: (min_y.floor() as i64).max(0),
        max_x: (max_x.ceil() as i64).min(image_width as i64),
        max_y: (max_y.ceil() as i64).min(image_height as i64),
    }
}

/// Point-in-polygon test against a hex vertex ring (even-odd crossing rule).
///
/// Used by tests to verify mask output; kept here so the test-side polygon
/// definition can never drift from the vertices the mask was built from.
pub fn point_in_hex(x: f64, y: f64, vertices: &[PixelPoint; 6]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (&vertices[i], &vertices[j]);
        if (vi.y > y) != (vj.y > y)
            && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axial::hex_to_pixel;

    #[test]
    fn test_vertices_lie_on_circumradius() {
        let center = hex_to_pixel(3, -1);
        for v in hex_vertices(3, -1) {
            let d = center.distance_to(&v);
            assert!((d - HEX_SIZE).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_vertex_points_along_x() {
        let center = hex_to_pixel(0, 0);
        let v = hex_vertices(0, 0)[0];
        assert!((v.x - (center.x + HEX_SIZE)).abs() < 1e-9);
        assert!((v.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_inside_image() {
        let verts = hex_vertices(3, 3);
        let bb = bounding_box(&verts, 2000, 2000);
        assert!(!bb.is_empty());
        // 100px wide, ~87px tall, +/-1 for floor/ceil
        assert!((bb.width() - 100).abs() <= 2);
        assert!((bb.height() - 87).abs() <= 2);
    }

    #[test]
    fn test_bounding_box_clamps_to_origin() {
        // Hex at the origin pokes out past the top-left corner.
        let verts = hex_vertices(0, 0);
        let bb = bounding_box(&verts, 500, 500);
        assert_eq!(bb.min_x, 0);
        assert_eq!(bb.min_y, 0);
        assert!(bb.max_x > 0 && bb.max_y > 0);
    }

    #[test]
    fn test_bounding_box_fully_outside_is_empty() {
        let verts = hex_vertices(1000, 1000);
        let bb = bounding_box(&verts, 100, 100);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_bounding_box_negative_hex_is_empty() {
        let verts = hex_vertices(-50, -50);
        let bb = bounding_box(&verts, 100, 100);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_point_in_hex_center_and_outside() {
        let verts = hex_vertices(0, 0);
        assert!(point_in_hex(0.0, 0.0, &verts));
        assert!(point_in_hex(20.0, 10.0, &verts));
        assert!(!point_in_hex(60.0, 0.0, &verts));
        assert!(!point_in_hex(0.0, 60.0, &verts));
    }
}
