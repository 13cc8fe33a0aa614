use std::marker::PhantomData;

use freetype::ffi;

use crate::bitmap::Bitmap;
use crate::error::{FtError, Result};
use crate::flags::RenderMode;
use crate::metrics::{GlyphMetrics, Vector};

// FT_IMAGE_TAG('b', 'i', 't', 's')
const GLYPH_FORMAT_BITMAP: u32 = u32::from_be_bytes(*b"bits");

/// View of a face's glyph slot (`FT_GlyphSlot`).
///
/// The slot belongs to the face and is reused by every load, so a `Glyph`
/// holds the face's mutable borrow for as long as it lives. The slot goes
/// from empty, to loaded (outline) after [`Face::load_glyph`], to rendered
/// (bitmap) after [`Glyph::render`].
///
/// [`Face::load_glyph`]: crate::Face::load_glyph
#[derive(Debug)]
pub struct Glyph<'face> {
    slot: ffi::FT_GlyphSlot,
    _face: PhantomData<&'face mut ffi::FT_GlyphSlotRec>,
}

impl<'face> Glyph<'face> {
    /// # Safety
    /// `slot` must be the glyph slot of a face that stays mutably borrowed
    /// for `'face`.
    pub(crate) unsafe fn from_raw(slot: ffi::FT_GlyphSlot) -> Self {
        Self {
            slot,
            _face: PhantomData,
        }
    }

    pub fn as_raw(&self) -> ffi::FT_GlyphSlot {
        self.slot
    }

    fn rec(&self) -> &ffi::FT_GlyphSlotRec {
        unsafe { &*self.slot }
    }

    /// Metrics of the loaded glyph, in the face's scaled units.
    pub fn metrics(&self) -> GlyphMetrics {
        GlyphMetrics::from_raw(&self.rec().metrics)
    }

    /// Transformed, hinted advance of the loaded glyph.
    pub fn advance(&self) -> Vector {
        Vector::from_raw(&self.rec().advance)
    }

    /// The rendered bitmap. Empty until [`Glyph::render`] succeeds, unless
    /// the glyph was loaded with [`LoadFlags::RENDER`](crate::LoadFlags::RENDER)
    /// or came from a bitmap strike.
    pub fn bitmap(&self) -> Bitmap<'_> {
        unsafe { Bitmap::from_raw(&self.rec().bitmap) }
    }

    /// Horizontal distance from the pen origin to the bitmap's left edge.
    pub fn bitmap_left(&self) -> i32 {
        self.rec().bitmap_left as i32
    }

    /// Vertical distance from the baseline up to the bitmap's top row.
    pub fn bitmap_top(&self) -> i32 {
        self.rec().bitmap_top as i32
    }

    /// Whether the slot holds a bitmap rather than an outline.
    pub fn is_rendered(&self) -> bool {
        self.rec().format as u32 == GLYPH_FORMAT_BITMAP
    }

    /// Rasterize the loaded outline into the slot's bitmap.
    ///
    /// Rendering a slot that already holds a bitmap leaves it unchanged.
    pub fn render(&mut self, mode: RenderMode) -> Result<()> {
        FtError::from_code(unsafe { ffi::FT_Render_Glyph(self.slot, mode.to_raw()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_tag_matches_freetype() {
        assert_eq!(GLYPH_FORMAT_BITMAP, 0x6269_7473);
    }
}
