use freetype::ffi;

/// Pixel layout of a rendered bitmap (`FT_Pixel_Mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    /// Nothing rendered yet.
    #[default]
    None,
    /// 1 bit per pixel, MSB first.
    Mono,
    /// 8-bit coverage.
    Gray,
    Gray2,
    Gray4,
    /// 8-bit RGB triplets packed horizontally; `width` counts subpixels.
    Lcd,
    /// 8-bit RGB triplets stacked vertically; `rows` counts subpixels.
    LcdV,
    /// Premultiplied BGRA, used by color (emoji) fonts.
    Bgra,
}

impl PixelMode {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => PixelMode::Mono,
            2 => PixelMode::Gray,
            3 => PixelMode::Gray2,
            4 => PixelMode::Gray4,
            5 => PixelMode::Lcd,
            6 => PixelMode::LcdV,
            7 => PixelMode::Bgra,
            _ => PixelMode::None,
        }
    }

    /// Bytes holding the pixels of one row of `width` samples.
    fn row_bytes(self, width: usize) -> usize {
        match self {
            PixelMode::None => 0,
            PixelMode::Mono => width.div_ceil(8),
            PixelMode::Gray2 => width.div_ceil(4),
            PixelMode::Gray4 => width.div_ceil(2),
            PixelMode::Gray | PixelMode::Lcd | PixelMode::LcdV => width,
            PixelMode::Bgra => width * 4,
        }
    }
}

/// Borrowed view of the bitmap held by a glyph slot.
///
/// Rows are addressed top to bottom regardless of the sign of `pitch`.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    width: u32,
    rows: u32,
    pitch: i32,
    num_grays: u16,
    pixel_mode: PixelMode,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub(crate) fn new(
        width: u32,
        rows: u32,
        pitch: i32,
        num_grays: u16,
        pixel_mode: PixelMode,
        data: &'a [u8],
    ) -> Self {
        Self {
            width,
            rows,
            pitch,
            num_grays,
            pixel_mode,
            data,
        }
    }

    /// Borrow the bitmap of a glyph slot.
    ///
    /// # Safety
    /// `raw` must come from a live glyph slot and the returned view must not
    /// outlive the next load or render on that slot.
    pub(crate) unsafe fn from_raw(raw: &'a ffi::FT_Bitmap) -> Self {
        let width = raw.width as u32;
        let rows = raw.rows as u32;
        let pitch = raw.pitch as i32;
        let len = pitch.unsigned_abs() as usize * rows as usize;
        let data = if raw.buffer.is_null() || len == 0 {
            &[][..]
        } else {
            unsafe { std::slice::from_raw_parts(raw.buffer as *const u8, len) }
        };
        Self::new(
            width,
            rows,
            pitch,
            raw.num_grays as u16,
            PixelMode::from_raw(raw.pixel_mode as u8),
            data,
        )
    }

    /// Width in samples (for [`PixelMode::Lcd`] this is three times the
    /// pixel width).
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Signed byte distance between rows; negative for bottom-up storage.
    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn num_grays(&self) -> u16 {
        self.num_grays
    }

    pub fn pixel_mode(&self) -> PixelMode {
        self.pixel_mode
    }

    /// The raw buffer, `|pitch| * rows` bytes in storage order.
    pub fn buffer(&self) -> &'a [u8] {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows == 0 || self.data.is_empty()
    }

    /// Width in whole pixels.
    pub fn pixel_width(&self) -> u32 {
        match self.pixel_mode {
            PixelMode::Lcd => self.width / 3,
            _ => self.width,
        }
    }

    /// Height in whole pixels.
    pub fn pixel_rows(&self) -> u32 {
        match self.pixel_mode {
            PixelMode::LcdV => self.rows / 3,
            _ => self.rows,
        }
    }

    /// Pixel bytes of row `y`, counted from the top, without padding.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.rows || self.is_empty() {
            return None;
        }
        let stride = self.pitch.unsigned_abs() as usize;
        let line = if self.pitch >= 0 {
            y as usize
        } else {
            (self.rows - 1 - y) as usize
        };
        let start = line * stride;
        let len = self.pixel_mode.row_bytes(self.width as usize).min(stride);
        self.data.get(start..start + len)
    }

    /// Iterate rows from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.rows).filter_map(move |y| self.row(y))
    }

    /// Copy into a tightly packed, top-down buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        self.rows_iter().flat_map(|row| row.iter().copied()).collect()
    }

    /// Coverage of pixel (`x`, `y`) scaled to 0..=255, whatever the pixel
    /// mode. Subpixel modes average their three samples, BGRA reports alpha.
    pub fn coverage(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.pixel_width() || y >= self.pixel_rows() {
            return None;
        }
        let x = x as usize;
        let value = match self.pixel_mode {
            PixelMode::None => return None,
            PixelMode::Mono => {
                let byte = self.row(y)?[x / 8];
                if byte & (0x80 >> (x % 8)) != 0 { 255 } else { 0 }
            }
            PixelMode::Gray => self.row(y)?[x],
            PixelMode::Gray2 => {
                let byte = self.row(y)?[x / 4];
                ((byte >> (6 - 2 * (x % 4))) & 0x3) * 85
            }
            PixelMode::Gray4 => {
                let byte = self.row(y)?[x / 2];
                ((byte >> (4 - 4 * (x % 2))) & 0xF) * 17
            }
            PixelMode::Lcd => {
                let row = self.row(y)?;
                let sum: u32 = row[x * 3..x * 3 + 3].iter().map(|&v| v as u32).sum();
                (sum / 3) as u8
            }
            PixelMode::LcdV => {
                let sum: u32 = (0..3)
                    .filter_map(|i| self.row(y * 3 + i).map(|row| row[x] as u32))
                    .sum();
                (sum / 3) as u8
            }
            PixelMode::Bgra => self.row(y)?[x * 4 + 3],
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_pitch_reads_bottom_up_storage() {
        // Stored bottom row first, 2 bytes padding per row.
        let data = [3, 4, 0, 0, 1, 2, 0, 0];
        let bitmap = Bitmap::new(2, 2, -4, 256, PixelMode::Gray, &data);
        assert_eq!(bitmap.row(0), Some(&[1u8, 2][..]));
        assert_eq!(bitmap.row(1), Some(&[3u8, 4][..]));
        assert_eq!(bitmap.row(2), None);
        assert_eq!(bitmap.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn mono_rows_are_bit_packed() {
        let data = [0b1010_0000, 0, 0b0100_0000, 0];
        let bitmap = Bitmap::new(3, 2, 2, 2, PixelMode::Mono, &data);
        assert_eq!(bitmap.row(0), Some(&[0b1010_0000u8][..]));
        assert_eq!(bitmap.coverage(0, 0), Some(255));
        assert_eq!(bitmap.coverage(1, 0), Some(0));
        assert_eq!(bitmap.coverage(2, 0), Some(255));
        assert_eq!(bitmap.coverage(1, 1), Some(255));
        assert_eq!(bitmap.coverage(3, 0), None);
    }

    #[test]
    fn lcd_width_counts_subpixels() {
        let data = [30, 60, 90, 0, 0, 0];
        let bitmap = Bitmap::new(6, 1, 6, 256, PixelMode::Lcd, &data);
        assert_eq!(bitmap.pixel_width(), 2);
        assert_eq!(bitmap.coverage(0, 0), Some(60));
        assert_eq!(bitmap.coverage(1, 0), Some(0));
    }

    #[test]
    fn packed_gray_levels_scale_to_full_range() {
        let gray2 = [0b11_10_01_00];
        let bitmap = Bitmap::new(4, 1, 1, 4, PixelMode::Gray2, &gray2);
        let levels: Vec<_> = (0..4).filter_map(|x| bitmap.coverage(x, 0)).collect();
        assert_eq!(levels, vec![255, 170, 85, 0]);

        let gray4 = [0xF0];
        let bitmap = Bitmap::new(2, 1, 1, 16, PixelMode::Gray4, &gray4);
        assert_eq!(bitmap.coverage(0, 0), Some(255));
        assert_eq!(bitmap.coverage(1, 0), Some(0));
    }

    #[test]
    fn empty_bitmap_has_no_rows() {
        let bitmap = Bitmap::new(0, 0, 0, 0, PixelMode::None, &[]);
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.rows_iter().count(), 0);
        assert_eq!(bitmap.coverage(0, 0), None);
    }
}
