//! Pixel-level compositing helpers shared by extraction and grid views.

use rayon::prelude::*;

/// Multiply the alpha channel of `base` (RGBA) by a one-byte-per-pixel mask.
///
/// The mask acts purely as an alpha stencil: color channels are untouched,
/// `out_a = base_a * mask_a / 255`. Pixels fully outside the stencil end up
/// fully transparent.
pub fn apply_alpha_stencil(base: &mut [u8], mask: &[u8], width: usize) {
    debug_assert_eq!(base.len(), mask.len() * 4);

    base.par_chunks_mut(width * 4)
        .zip(mask.par_chunks(width))
        .for_each(|(row, mask_row)| {
            for (px, &m) in row.chunks_exact_mut(4).zip(mask_row) {
                px[3] = ((px[3] as u16 * m as u16) / 255) as u8;
            }
        });
}

/// Source-over blend an RGBA overlay onto an RGBA base of the same size.
///
/// Straight (non-premultiplied) alpha on both sides.
pub fn blend_over(base: &mut [u8], overlay: &[u8], width: usize) {
    debug_assert_eq!(base.len(), overlay.len());

    base.par_chunks_mut(width * 4)
        .zip(overlay.par_chunks(width * 4))
        .for_each(|(row, over_row)| {
            for (dst, src) in row.chunks_exact_mut(4).zip(over_row.chunks_exact(4)) {
                let src_a = src[3] as f32 / 255.0;
                if src[3] == 0 {
                    continue;
                }
                let dst_a = dst[3] as f32 / 255.0;
                let out_a = src_a + dst_a * (1.0 - src_a);
                if out_a > 0.0 {
                    for c in 0..3 {
                        dst[c] = ((src[c] as f32 * src_a
                            + dst[c] as f32 * dst_a * (1.0 - src_a))
                            / out_a) as u8;
                    }
                    dst[3] = (out_a * 255.0) as u8;
                }
            }
        });
}
