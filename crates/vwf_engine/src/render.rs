//! Glyph extraction from the companion atlas image.

use image::{imageops, RgbaImage};

use crate::{EngineError, Record, Result};

/// Crop the atlas to the record's `(u0,v0)-(u1,v1)` rectangle.
///
/// Fails with [`EngineError::InvalidGlyphRect`] when the rectangle is empty
/// or inverted (`u1 <= u0` or `v1 <= v0`), or when it reaches outside the
/// atlas. Callers are expected to substitute a placeholder image instead of
/// surfacing this to the user.
pub fn render_glyph(record: &Record, atlas: &RgbaImage) -> Result<RgbaImage> {
    let (u0, u1, v0, v1) = (record.u0, record.u1, record.v0, record.v1);
    if u1 <= u0 || v1 <= v0 || u32::from(u1) > atlas.width() || u32::from(v1) > atlas.height() {
        return Err(EngineError::InvalidGlyphRect { u0, v0, u1, v1 });
    }
    let width = u32::from(u1 - u0);
    let height = u32::from(v1 - v0);
    Ok(imageops::crop_imm(atlas, u32::from(u0), u32::from(v0), width, height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Record, RECORD_SIZE};

    fn record_with_rect(u0: u16, u1: u16, v0: u16, v1: u16) -> Record {
        let mut r = Record::decode(&[0u8; RECORD_SIZE]).unwrap();
        r.u0 = u0;
        r.u1 = u1;
        r.v0 = v0;
        r.v1 = v1;
        r
    }

    #[test]
    fn crops_the_atlas_rectangle() {
        let atlas = RgbaImage::from_fn(8, 8, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
        let glyph = render_glyph(&record_with_rect(2, 6, 1, 5), &atlas).unwrap();
        assert_eq!(glyph.dimensions(), (4, 4));
        assert_eq!(glyph.get_pixel(0, 0), &image::Rgba([2, 1, 0, 255]));
        assert_eq!(glyph.get_pixel(3, 3), &image::Rgba([5, 4, 0, 255]));
    }

    #[test]
    fn rejects_empty_inverted_or_out_of_bounds_rects() {
        let atlas = RgbaImage::new(8, 8);
        for r in [
            record_with_rect(6, 2, 1, 5),  // inverted horizontally
            record_with_rect(2, 2, 1, 5),  // empty
            record_with_rect(2, 6, 5, 5),  // empty vertically
            record_with_rect(2, 6, 50, 48), // inverted vertically
            record_with_rect(2, 9, 1, 5),  // past the right edge
        ] {
            assert!(matches!(render_glyph(&r, &atlas), Err(EngineError::InvalidGlyphRect { .. })));
        }
    }
}
