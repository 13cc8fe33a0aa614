//! Ownership-safe wrappers over the FreeType C API.
//!
//! FreeType does the real work here (font parsing, hinting, rasterization);
//! this crate only owns the native handles and turns error codes into
//! [`FtError`] values.
//!
//! The handles form a strict hierarchy:
//!
//! - [`Library`] owns an `FT_Library` and opens faces.
//! - [`Face`] owns an `FT_Face` and borrows the library it came from.
//! - [`Glyph`] is a view over the face's single glyph slot. It borrows the
//!   face mutably, so loading another glyph ends the previous view.
//!
//! None of these types are `Send` or `Sync`. A library together with its
//! faces must stay on one thread.
//!
//! ```no_run
//! use rune_freetype::{Library, LoadFlags, RenderMode};
//!
//! # fn main() -> rune_freetype::Result<()> {
//! let library = Library::init()?;
//! let mut face = library.new_face("DejaVuSans.ttf", 0)?;
//! face.set_char_size_pt(16, rune_freetype::DEFAULT_DPI)?;
//! let index = face.char_index('A' as u32)?;
//! let mut glyph = face.load_glyph(index, LoadFlags::DEFAULT)?;
//! glyph.render(RenderMode::Normal)?;
//! println!("{}x{}", glyph.bitmap().width(), glyph.bitmap().rows());
//! # Ok(())
//! # }
//! ```

mod bitmap;
mod error;
mod face;
mod flags;
mod glyph;
mod library;
mod metrics;

pub use bitmap::{Bitmap, PixelMode};
pub use error::{FtError, Result, codes, describe};
pub use face::{CharMapIter, DEFAULT_DPI, Face};
pub use flags::{LoadFlags, RenderMode};
pub use glyph::Glyph;
pub use library::Library;
pub use metrics::{GlyphMetrics, SizeMetrics, Vector};
