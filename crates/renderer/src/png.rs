//! PNG encoding for RGBA image data.
//!
//! Two encoding paths:
//! - **Indexed PNG (color type 3)** when the image has ≤256 unique colors.
//!   Sentinel images (flat transparent or flat gray) hit this path and come
//!   out tiny and byte-stable.
//! - **RGBA PNG (color type 6)** for everything else, which in practice is
//!   every crop of a real photograph.
//!
//! `encode_auto` picks between them; `encode_rgba` forces the RGBA path.
//! No ancillary chunks are written, so output depends only on pixel content.

use std::collections::HashMap;
use std::io::Write;

use hex_common::{HexError, HexResult};

/// Maximum palette entries for an indexed PNG.
const MAX_PALETTE_SIZE: usize = 256;

/// Encode RGBA pixels as PNG, using an indexed palette when possible.
pub fn encode_auto(pixels: &[u8], width: usize, height: usize) -> HexResult<Vec<u8>> {
    match extract_palette(pixels) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 palette key.
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Map pixels to a palette of at most 256 colors, or None if they don't fit.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<(u8, u8, u8, u8)>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<(u8, u8, u8, u8)> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Encode an indexed PNG (color type 3) from palette and per-pixel indices.
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> HexResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth: 8 bits per palette index
    ihdr.push(3); // color type: indexed
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let mut plte = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some palette entry is non-opaque
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode an RGBA PNG (color type 6).
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> HexResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(6); // color type: RGBA
    ihdr.push(0);
    ihdr.push(0);
    ihdr.push(0);
    write_chunk(&mut png, b"IHDR", &ihdr);

    let idat = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Prefix each scanline with filter type 0 and zlib-compress the result.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> HexResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    if data.len() < stride * height {
        return Err(HexError::EncodingFailure(format!(
            "pixel buffer too small: {} < {}",
            data.len(),
            stride * height
        )));
    }

    let mut raw = Vec::with_capacity(height * (1 + stride));
    for y in 0..height {
        raw.push(0); // filter type: none
        raw.extend_from_slice(&data[y * stride..(y + 1) * stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| HexError::EncodingFailure(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| HexError::EncodingFailure(format!("IDAT compression failed: {}", e)))
}

/// Write one PNG chunk: length, type, data, CRC32 of type+data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
