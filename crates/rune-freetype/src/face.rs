use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;
use std::sync::Arc;

use freetype::ffi;
use log::{trace, warn};

use crate::error::{FtError, Result};
use crate::flags::LoadFlags;
use crate::glyph::Glyph;
use crate::library::Library;
use crate::metrics::{SizeMetrics, Vector};

/// Resolution used by [`Face::set_char_size_pt`] callers that have no
/// better value.
pub const DEFAULT_DPI: u32 = 96;

const FACE_FLAG_SCALABLE: ffi::FT_Long = 1 << 0;
const FACE_FLAG_FIXED_WIDTH: ffi::FT_Long = 1 << 2;
const FACE_FLAG_KERNING: ffi::FT_Long = 1 << 6;
const KERNING_DEFAULT: u32 = 0;

/// An owned font face (`FT_Face`) opened from a [`Library`].
///
/// The face owns one glyph slot that every load overwrites in place. Views
/// of that slot ([`Glyph`]) borrow the face mutably, so a view can never be
/// read after a later load.
pub struct Face<'lib> {
    raw: ffi::FT_Face,
    // Backing store for in-memory faces; must outlive `raw`.
    _data: Option<Arc<[u8]>>,
    _library: PhantomData<&'lib Library>,
}

impl<'lib> Face<'lib> {
    /// Take ownership of a face returned by `FT_New_Face`/`FT_New_Memory_Face`.
    ///
    /// # Safety
    /// `raw` must be a valid face created from the library borrowed for
    /// `'lib`, and `data` must hold the memory it was opened from, if any.
    pub(crate) unsafe fn from_raw(raw: ffi::FT_Face, data: Option<Arc<[u8]>>) -> Self {
        Self {
            raw,
            _data: data,
            _library: PhantomData,
        }
    }

    pub fn as_raw(&self) -> ffi::FT_Face {
        self.raw
    }

    fn rec(&self) -> &ffi::FT_FaceRec {
        unsafe { &*self.raw }
    }

    /// Set the nominal size in 26.6 points (`64` = one point).
    ///
    /// A zero width means "same as height"; a zero resolution means "same as
    /// the other one". Fixed-size bitmap faces reject sizes they don't carry.
    pub fn set_char_size(
        &mut self,
        char_width: i64,
        char_height: i64,
        horz_resolution: u32,
        vert_resolution: u32,
    ) -> Result<()> {
        FtError::from_code(unsafe {
            ffi::FT_Set_Char_Size(
                self.raw,
                char_width as ffi::FT_F26Dot6,
                char_height as ffi::FT_F26Dot6,
                horz_resolution as ffi::FT_UInt,
                vert_resolution as ffi::FT_UInt,
            )
        })
    }

    /// Set the size in whole points at `dpi`, square pixels.
    pub fn set_char_size_pt(&mut self, points: u32, dpi: u32) -> Result<()> {
        self.set_char_size(0, points as i64 * 64, 0, dpi)
    }

    /// Set the size in pixels per em. A zero dimension follows the other.
    pub fn set_pixel_sizes(&mut self, pixel_width: u32, pixel_height: u32) -> Result<()> {
        FtError::from_code(unsafe {
            ffi::FT_Set_Pixel_Sizes(
                self.raw,
                pixel_width as ffi::FT_UInt,
                pixel_height as ffi::FT_UInt,
            )
        })
    }

    /// Glyph index for `code` in the active character map.
    ///
    /// Returns [`FtError::InvalidCharCode`] carrying `code` when the font
    /// does not map it.
    pub fn char_index(&self, code: u32) -> Result<u32> {
        let index = unsafe { ffi::FT_Get_Char_Index(self.raw, code as ffi::FT_ULong) };
        if index == 0 {
            Err(FtError::InvalidCharCode { code })
        } else {
            Ok(index as u32)
        }
    }

    pub fn char_index_for(&self, ch: char) -> Result<u32> {
        self.char_index(ch as u32)
    }

    /// Whether the active character map covers `code`.
    pub fn has_char(&self, code: u32) -> bool {
        self.char_index(code).is_ok()
    }

    /// Iterate `(character code, glyph index)` pairs of the active
    /// character map in ascending code order.
    pub fn chars(&self) -> CharMapIter<'_> {
        let mut glyph_index: ffi::FT_UInt = 0;
        let code = unsafe { ffi::FT_Get_First_Char(self.raw, &mut glyph_index) };
        CharMapIter {
            face: self.raw,
            next: (glyph_index != 0).then_some((code as u32, glyph_index as u32)),
            _face: PhantomData,
        }
    }

    /// Decode glyph `glyph_index` into the face's slot and return a view of it.
    ///
    /// The previous contents of the slot are overwritten.
    pub fn load_glyph(&mut self, glyph_index: u32, flags: LoadFlags) -> Result<Glyph<'_>> {
        FtError::from_code(unsafe {
            ffi::FT_Load_Glyph(self.raw, glyph_index as ffi::FT_UInt, flags.to_raw())
        })?;
        trace!("loaded glyph {} with flags {:?}", glyph_index, flags);
        Ok(self.glyph())
    }

    /// Look up `code` and load its glyph.
    pub fn load_char(&mut self, code: u32, flags: LoadFlags) -> Result<Glyph<'_>> {
        let index = self.char_index(code)?;
        self.load_glyph(index, flags)
    }

    /// View of the glyph slot as it currently is.
    pub fn glyph(&mut self) -> Glyph<'_> {
        unsafe { Glyph::from_raw(self.rec().glyph) }
    }

    /// Scaled metrics of the active size.
    ///
    /// These are whatever FreeType holds for the current size object; they
    /// are only meaningful after a size has been set.
    pub fn size_metrics(&self) -> Option<SizeMetrics> {
        let size = self.rec().size;
        if size.is_null() {
            return None;
        }
        Some(SizeMetrics::from_raw(unsafe { &(*size).metrics }))
    }

    /// Kerning between two glyph indices, scaled and grid-fitted to the
    /// active size. Zero for faces without kerning data.
    pub fn kerning(&self, left: u32, right: u32) -> Result<Vector> {
        let mut kerning = ffi::FT_Vector { x: 0, y: 0 };
        FtError::from_code(unsafe {
            ffi::FT_Get_Kerning(
                self.raw,
                left as ffi::FT_UInt,
                right as ffi::FT_UInt,
                KERNING_DEFAULT,
                &mut kerning,
            )
        })?;
        Ok(Vector::from_raw(&kerning))
    }

    /// Number of faces in the file this face came from.
    pub fn num_faces(&self) -> usize {
        self.rec().num_faces as usize
    }

    pub fn face_index(&self) -> usize {
        (self.rec().face_index & 0xFFFF) as usize
    }

    pub fn num_glyphs(&self) -> usize {
        self.rec().num_glyphs as usize
    }

    /// Design units per em; zero for bitmap-only faces.
    pub fn units_per_em(&self) -> u16 {
        self.rec().units_per_EM as u16
    }

    pub fn family_name(&self) -> Option<String> {
        c_string(self.rec().family_name)
    }

    pub fn style_name(&self) -> Option<String> {
        c_string(self.rec().style_name)
    }

    pub fn is_scalable(&self) -> bool {
        self.rec().face_flags & FACE_FLAG_SCALABLE != 0
    }

    pub fn is_fixed_width(&self) -> bool {
        self.rec().face_flags & FACE_FLAG_FIXED_WIDTH != 0
    }

    pub fn has_kerning(&self) -> bool {
        self.rec().face_flags & FACE_FLAG_KERNING != 0
    }

    /// Release the face now, reporting any FreeType failure.
    ///
    /// Dropping the face does the same but can only log the failure.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        let raw = std::mem::replace(&mut self.raw, ptr::null_mut());
        if raw.is_null() {
            return Ok(());
        }
        trace!("releasing face ({:p})", raw);
        FtError::from_code(unsafe { ffi::FT_Done_Face(raw) })
    }
}

impl fmt::Debug for Face<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("raw", &self.raw)
            .field("in_memory", &self._data.is_some())
            .finish()
    }
}

impl Drop for Face<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("FreeType face teardown failed: {}", err);
        }
    }
}

fn c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

/// Iterator over the active character map of a [`Face`].
pub struct CharMapIter<'f> {
    face: ffi::FT_Face,
    next: Option<(u32, u32)>,
    _face: PhantomData<&'f ffi::FT_FaceRec>,
}

impl Iterator for CharMapIter<'_> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (code, glyph_index) = self.next?;
        let mut next_index: ffi::FT_UInt = 0;
        let next_code =
            unsafe { ffi::FT_Get_Next_Char(self.face, code as ffi::FT_ULong, &mut next_index) };
        self.next = (next_index != 0).then_some((next_code as u32, next_index as u32));
        Some((code, glyph_index))
    }
}
