use std::ffi::CString;
use std::os::raw::c_int;
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use freetype::ffi;
use log::{debug, trace, warn};

use crate::error::{FtError, Result, codes, describe};
use crate::face::Face;

// Exported by libfreetype but not bound by freetype-sys.
unsafe extern "C" {
    fn FT_Library_Version(
        library: ffi::FT_Library,
        amajor: *mut c_int,
        aminor: *mut c_int,
        apatch: *mut c_int,
    );
}

/// Owned FreeType library instance (`FT_Library`), the root of every face.
///
/// Faces borrow the library, so it cannot be dropped or closed while any
/// face is still alive. Not `Send`: the library and its faces share
/// unsynchronized state and must stay on the thread that created them.
#[derive(Debug)]
pub struct Library {
    raw: ffi::FT_Library,
}

impl Library {
    /// Initialize a new FreeType library with the default modules.
    pub fn init() -> Result<Self> {
        let mut raw: ffi::FT_Library = ptr::null_mut();
        FtError::from_code(unsafe { ffi::FT_Init_FreeType(&mut raw) })?;
        debug!("FreeType library initialized ({:p})", raw);
        Ok(Self { raw })
    }

    /// FreeType version as `(major, minor, patch)`.
    pub fn version(&self) -> (i32, i32, i32) {
        let (mut major, mut minor, mut patch): (c_int, c_int, c_int) = (0, 0, 0);
        unsafe { FT_Library_Version(self.raw, &mut major, &mut minor, &mut patch) };
        (major as i32, minor as i32, patch as i32)
    }

    /// Open the face at `face_index` in the font file at `path`.
    ///
    /// Fails with [`FtError::Engine`] when the file is missing, unreadable,
    /// not a font FreeType understands, or has no face at `face_index`.
    pub fn new_face<P: AsRef<Path>>(&self, path: P, face_index: usize) -> Result<Face<'_>> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        let index = raw_face_index(face_index)?;
        let mut raw: ffi::FT_Face = ptr::null_mut();
        let code = unsafe { ffi::FT_New_Face(self.raw, c_path.as_ptr(), index, &mut raw) };
        if let Err(err) = FtError::from_code(code).and_then(|()| check_complete(raw)) {
            debug!("failed to open face {} of {}: {}", face_index, path.display(), err);
            return Err(err);
        }
        trace!("opened face {} of {}", face_index, path.display());
        Ok(unsafe { Face::from_raw(raw, None) })
    }

    /// Open the face at `face_index` from font data in memory.
    ///
    /// FreeType reads from the buffer for the whole life of the face, so the
    /// face keeps its own reference to `data`.
    pub fn new_memory_face<D: Into<Arc<[u8]>>>(&self, data: D, face_index: usize) -> Result<Face<'_>> {
        let data: Arc<[u8]> = data.into();
        let index = raw_face_index(face_index)?;
        let mut raw: ffi::FT_Face = ptr::null_mut();
        let code = unsafe {
            ffi::FT_New_Memory_Face(
                self.raw,
                data.as_ptr(),
                data.len() as ffi::FT_Long,
                index,
                &mut raw,
            )
        };
        if let Err(err) = FtError::from_code(code).and_then(|()| check_complete(raw)) {
            debug!("failed to open in-memory face {} ({} bytes): {}", face_index, data.len(), err);
            return Err(err);
        }
        trace!("opened in-memory face {} ({} bytes)", face_index, data.len());
        Ok(unsafe { Face::from_raw(raw, Some(data)) })
    }

    /// Number of faces in the font file at `path` (more than one for
    /// collections such as `.ttc`).
    pub fn face_count<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let face = self.new_face(path, 0)?;
        Ok(face.num_faces())
    }

    pub fn as_raw(&self) -> ffi::FT_Library {
        self.raw
    }

    /// Tear the library down now, reporting any FreeType failure.
    ///
    /// Dropping the library does the same but can only log the failure.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        let raw = std::mem::replace(&mut self.raw, ptr::null_mut());
        if raw.is_null() {
            return Ok(());
        }
        trace!("releasing FreeType library ({:p})", raw);
        FtError::from_code(unsafe { ffi::FT_Done_FreeType(raw) })
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!("FreeType library teardown failed: {}", err);
        }
    }
}

/// Negative indices ask FreeType for a format check only and yield a face
/// without a glyph slot or size, so they are refused up front.
fn raw_face_index(face_index: usize) -> Result<ffi::FT_Long> {
    ffi::FT_Long::try_from(face_index).map_err(|_| FtError::Engine {
        code: codes::INVALID_ARGUMENT,
        description: describe(codes::INVALID_ARGUMENT),
    })
}

/// Reject a face FreeType opened without a glyph slot, releasing it.
fn check_complete(raw: ffi::FT_Face) -> Result<()> {
    if !raw.is_null() && unsafe { !(*raw).glyph.is_null() } {
        return Ok(());
    }
    if !raw.is_null() {
        let _ = unsafe { ffi::FT_Done_Face(raw) };
    }
    Err(FtError::Engine {
        code: codes::INVALID_FACE_HANDLE,
        description: describe(codes::INVALID_FACE_HANDLE),
    })
}

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes()).map_err(|_| FtError::Path(path.to_path_buf()))
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    let utf8 = path.to_str().ok_or_else(|| FtError::Path(path.to_path_buf()))?;
    CString::new(utf8).map_err(|_| FtError::Path(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_nul_is_rejected_before_freetype() {
        let err = path_to_cstring(Path::new("fonts/bad\0name.ttf")).unwrap_err();
        assert_eq!(err, FtError::Path("fonts/bad\0name.ttf".into()));
    }

    #[test]
    fn face_index_beyond_ft_long_is_invalid_argument() {
        let err = raw_face_index(usize::MAX).unwrap_err();
        assert_eq!(err.code(), Some(codes::INVALID_ARGUMENT));
        assert_eq!(raw_face_index(3), Ok(3));
    }

    #[test]
    fn plain_paths_convert() {
        let c_path = path_to_cstring(Path::new("/usr/share/fonts/a.ttf")).unwrap();
        assert_eq!(c_path.as_bytes(), b"/usr/share/fonts/a.ttf");
    }
}
