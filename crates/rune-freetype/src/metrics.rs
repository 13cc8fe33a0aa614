//! Plain copies of FreeType's metric records.
//!
//! All distances are 26.6 fixed point (1/64th of a pixel) once a size has
//! been selected, or font units when a glyph was loaded with
//! [`LoadFlags::NO_SCALE`](crate::LoadFlags::NO_SCALE).

use freetype::ffi;

/// Convert a 26.6 fixed point value to pixels.
pub(crate) fn f26dot6_to_px(value: i64) -> f32 {
    value as f32 / 64.0
}

/// A 26.6 two-dimensional vector (advance, kerning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector {
    pub x: i64,
    pub y: i64,
}

impl Vector {
    pub(crate) fn from_raw(raw: &ffi::FT_Vector) -> Self {
        Self {
            x: raw.x as i64,
            y: raw.y as i64,
        }
    }

    pub fn x_px(&self) -> f32 {
        f26dot6_to_px(self.x)
    }

    pub fn y_px(&self) -> f32 {
        f26dot6_to_px(self.y)
    }
}

/// Metrics of the glyph currently loaded in a face's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    pub width: i64,
    pub height: i64,
    pub hori_bearing_x: i64,
    pub hori_bearing_y: i64,
    pub hori_advance: i64,
    pub vert_bearing_x: i64,
    pub vert_bearing_y: i64,
    pub vert_advance: i64,
}

impl GlyphMetrics {
    pub(crate) fn from_raw(raw: &ffi::FT_Glyph_Metrics) -> Self {
        Self {
            width: raw.width as i64,
            height: raw.height as i64,
            hori_bearing_x: raw.horiBearingX as i64,
            hori_bearing_y: raw.horiBearingY as i64,
            hori_advance: raw.horiAdvance as i64,
            vert_bearing_x: raw.vertBearingX as i64,
            vert_bearing_y: raw.vertBearingY as i64,
            vert_advance: raw.vertAdvance as i64,
        }
    }

    /// Horizontal advance in pixels.
    pub fn advance_px(&self) -> f32 {
        f26dot6_to_px(self.hori_advance)
    }

    /// Outline bounding box size in pixels.
    pub fn size_px(&self) -> (f32, f32) {
        (f26dot6_to_px(self.width), f26dot6_to_px(self.height))
    }

    /// True when the glyph has no visible extent (e.g. a space).
    pub fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Scaled metrics of the face's active size, as set by
/// [`Face::set_char_size`](crate::Face::set_char_size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeMetrics {
    /// Horizontal pixels per em.
    pub x_ppem: u16,
    /// Vertical pixels per em.
    pub y_ppem: u16,
    /// 16.16 scale from font units to 26.6 pixels.
    pub x_scale: i64,
    pub y_scale: i64,
    pub ascender: i64,
    /// Negative below the baseline.
    pub descender: i64,
    /// Baseline-to-baseline distance.
    pub height: i64,
    pub max_advance: i64,
}

impl SizeMetrics {
    pub(crate) fn from_raw(raw: &ffi::FT_Size_Metrics) -> Self {
        Self {
            x_ppem: raw.x_ppem as u16,
            y_ppem: raw.y_ppem as u16,
            x_scale: raw.x_scale as i64,
            y_scale: raw.y_scale as i64,
            ascender: raw.ascender as i64,
            descender: raw.descender as i64,
            height: raw.height as i64,
            max_advance: raw.max_advance as i64,
        }
    }

    pub fn line_height(&self) -> i64 {
        self.height
    }

    pub fn ascender_px(&self) -> f32 {
        f26dot6_to_px(self.ascender)
    }

    pub fn descender_px(&self) -> f32 {
        f26dot6_to_px(self.descender)
    }

    pub fn line_height_px(&self) -> f32 {
        f26dot6_to_px(self.height)
    }

    pub fn max_advance_px(&self) -> f32 {
        f26dot6_to_px(self.max_advance)
    }

    /// Leading beyond ascender + descender, clamped at zero.
    pub fn line_gap_px(&self) -> f32 {
        (self.line_height_px() - (self.ascender_px() - self.descender_px())).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_26_6_to_pixels() {
        assert_eq!(f26dot6_to_px(64), 1.0);
        assert_eq!(f26dot6_to_px(-96), -1.5);
    }

    #[test]
    fn line_gap_is_never_negative() {
        let tight = SizeMetrics {
            ascender: 10 * 64,
            descender: -4 * 64,
            height: 12 * 64,
            ..Default::default()
        };
        assert_eq!(tight.line_gap_px(), 0.0);

        let loose = SizeMetrics {
            height: 16 * 64,
            ..tight
        };
        assert_eq!(loose.line_gap_px(), 2.0);
        assert_eq!(loose.line_height(), 1024);
    }

    #[test]
    fn blank_glyph_has_no_extent() {
        let space = GlyphMetrics {
            hori_advance: 4 * 64,
            ..Default::default()
        };
        assert!(space.is_blank());
        assert_eq!(space.advance_px(), 4.0);
    }
}
