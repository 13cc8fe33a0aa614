//! Error types for FreeType operations.

use std::path::PathBuf;

use freetype::ffi;
use thiserror::Error;

/// Result type for FreeType operations.
pub type Result<T> = std::result::Result<T, FtError>;

/// Errors surfaced by the wrappers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FtError {
    /// A FreeType call returned a non-zero error code.
    #[error("FreeType error {code:#04x}: {description}")]
    Engine {
        code: ffi::FT_Error,
        description: &'static str,
    },

    /// The active character map has no glyph for this character code.
    ///
    /// Kept apart from [`FtError::Engine`] because probing a font for
    /// coverage is routine and callers branch on it.
    #[error("no glyph mapped for character code U+{code:04X}")]
    InvalidCharCode { code: u32 },

    /// The path cannot be handed to the C API (interior NUL byte or not
    /// representable on this platform).
    #[error("font path cannot be passed to FreeType: {0}")]
    Path(PathBuf),
}

impl FtError {
    /// Convert a raw FreeType return value into a `Result`.
    pub fn from_code(code: ffi::FT_Error) -> Result<()> {
        if code == codes::OK {
            Ok(())
        } else {
            Err(FtError::Engine {
                code,
                description: describe(code),
            })
        }
    }

    /// The FreeType error code behind this error, if it came from the engine.
    pub fn code(&self) -> Option<ffi::FT_Error> {
        match self {
            FtError::Engine { code, .. } => Some(*code),
            FtError::InvalidCharCode { .. } => Some(codes::INVALID_CHARACTER_CODE),
            FtError::Path(_) => None,
        }
    }

    /// The engine's description of the failure, if it came from the engine.
    pub fn description(&self) -> Option<&'static str> {
        self.code().map(describe)
    }

    pub fn is_invalid_char_code(&self) -> bool {
        matches!(self, FtError::InvalidCharCode { .. })
    }
}

/// FreeType error codes (`fterrdef.h`) this crate refers to by name.
pub mod codes {
    use freetype::ffi::FT_Error;

    pub const OK: FT_Error = 0x00;
    pub const CANNOT_OPEN_RESOURCE: FT_Error = 0x01;
    pub const UNKNOWN_FILE_FORMAT: FT_Error = 0x02;
    pub const INVALID_FILE_FORMAT: FT_Error = 0x03;
    pub const INVALID_ARGUMENT: FT_Error = 0x06;
    pub const INVALID_GLYPH_INDEX: FT_Error = 0x10;
    pub const INVALID_CHARACTER_CODE: FT_Error = 0x11;
    pub const INVALID_GLYPH_FORMAT: FT_Error = 0x12;
    pub const CANNOT_RENDER_GLYPH: FT_Error = 0x13;
    pub const INVALID_PIXEL_SIZE: FT_Error = 0x17;
    pub const INVALID_HANDLE: FT_Error = 0x20;
    pub const INVALID_LIBRARY_HANDLE: FT_Error = 0x21;
    pub const INVALID_FACE_HANDLE: FT_Error = 0x23;
    pub const OUT_OF_MEMORY: FT_Error = 0x40;
}

/// The message FreeType associates with an error code.
///
/// Mirrors the table in `fterrdef.h`, which is also what `FT_Error_String`
/// returns when the library is built with error strings.
pub fn describe(code: ffi::FT_Error) -> &'static str {
    match code {
        0x00 => "no error",

        // generic errors
        0x01 => "cannot open resource",
        0x02 => "unknown file format",
        0x03 => "broken file",
        0x04 => "invalid FreeType version",
        0x05 => "module version is too low",
        0x06 => "invalid argument",
        0x07 => "unimplemented feature",
        0x08 => "broken table",
        0x09 => "broken offset within table",
        0x0A => "array allocation size too large",
        0x0B => "missing module",
        0x0C => "missing property",

        // glyph/character errors
        0x10 => "invalid glyph index",
        0x11 => "invalid character code",
        0x12 => "unsupported glyph image format",
        0x13 => "cannot render this glyph format",
        0x14 => "invalid outline",
        0x15 => "invalid composite glyph",
        0x16 => "too many hints",
        0x17 => "invalid pixel size",
        0x18 => "invalid SVG document",

        // handle errors
        0x20 => "invalid object handle",
        0x21 => "invalid library handle",
        0x22 => "invalid module handle",
        0x23 => "invalid face handle",
        0x24 => "invalid size handle",
        0x25 => "invalid glyph slot handle",
        0x26 => "invalid charmap handle",
        0x27 => "invalid cache manager handle",
        0x28 => "invalid stream handle",

        // driver errors
        0x30 => "too many modules",
        0x31 => "too many extensions",

        // memory errors
        0x40 => "out of memory",
        0x41 => "unlisted object",

        // stream errors
        0x51 => "cannot open stream",
        0x52 => "invalid stream seek",
        0x53 => "invalid stream skip",
        0x54 => "invalid stream read",
        0x55 => "invalid stream operation",
        0x56 => "invalid frame operation",
        0x57 => "nested frame access",
        0x58 => "invalid frame read",

        // raster errors
        0x60 => "raster uninitialized",
        0x61 => "raster corrupted",
        0x62 => "raster overflow",
        0x63 => "negative height while rastering",

        // cache errors
        0x70 => "too many registered caches",

        // TrueType and SFNT errors
        0x80 => "invalid opcode",
        0x81 => "too few arguments",
        0x82 => "stack overflow",
        0x83 => "code overflow",
        0x84 => "bad argument",
        0x85 => "division by zero",
        0x86 => "invalid reference",
        0x87 => "found debug opcode",
        0x88 => "found ENDF opcode in execution stream",
        0x89 => "nested DEFS",
        0x8A => "invalid code range",
        0x8B => "execution context too long",
        0x8C => "too many function definitions",
        0x8D => "too many instruction definitions",
        0x8E => "SFNT font table missing",
        0x8F => "horizontal header (hhea) table missing",
        0x90 => "locations (loca) table missing",
        0x91 => "name table missing",
        0x92 => "character map (cmap) table missing",
        0x93 => "horizontal metrics (hmtx) table missing",
        0x94 => "PostScript (post) table missing",
        0x95 => "invalid horizontal metrics",
        0x96 => "invalid character map (cmap) format",
        0x97 => "invalid ppem value",
        0x98 => "invalid vertical metrics",
        0x99 => "could not find context",
        0x9A => "invalid PostScript (post) table format",
        0x9B => "invalid PostScript (post) table",
        0x9C => "found FDEF or IDEF opcode in glyf bytecode",
        0x9D => "missing bitmap in strike",
        0x9E => "SVG hooks have not been set",

        // CFF, CID, and Type 1 errors
        0xA0 => "opcode syntax error",
        0xA1 => "argument stack underflow",
        0xA2 => "ignore",
        0xA3 => "no Unicode glyph name found",
        0xA4 => "glyph too big for hinting",

        // BDF errors
        0xB0 => "`STARTFONT' field missing",
        0xB1 => "`FONT' field missing",
        0xB2 => "`SIZE' field missing",
        0xB3 => "`FONTBOUNDINGBOX' field missing",
        0xB4 => "`CHARS' field missing",
        0xB5 => "`STARTCHAR' field missing",
        0xB6 => "`ENCODING' field missing",
        0xB7 => "`BBX' field missing",
        0xB8 => "`BBX' too big",
        0xB9 => "Font header corrupted or missing fields",
        0xBA => "Font glyphs corrupted or missing fields",

        _ => "unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_success() {
        assert_eq!(FtError::from_code(codes::OK), Ok(()));
    }

    #[test]
    fn nonzero_keeps_code_and_description() {
        let err = FtError::from_code(codes::UNKNOWN_FILE_FORMAT).unwrap_err();
        assert_eq!(
            err,
            FtError::Engine {
                code: 0x02,
                description: "unknown file format",
            }
        );
        assert_eq!(err.code(), Some(0x02));
        assert_eq!(err.to_string(), "FreeType error 0x02: unknown file format");
    }

    #[test]
    fn unknown_codes_still_error() {
        let err = FtError::from_code(0x7F).unwrap_err();
        assert_eq!(err.description(), Some("unknown error"));
        assert_eq!(err.code(), Some(0x7F));
    }

    #[test]
    fn invalid_char_code_reports_engine_code() {
        let err = FtError::InvalidCharCode { code: 0x10FFFF };
        assert!(err.is_invalid_char_code());
        assert_eq!(err.code(), Some(codes::INVALID_CHARACTER_CODE));
        assert_eq!(err.description(), Some("invalid character code"));
        assert_eq!(err.to_string(), "no glyph mapped for character code U+10FFFF");
    }

    #[test]
    fn path_errors_have_no_engine_code() {
        let err = FtError::Path(PathBuf::from("bad\0path"));
        assert_eq!(err.code(), None);
        assert!(!err.is_invalid_char_code());
    }
}
