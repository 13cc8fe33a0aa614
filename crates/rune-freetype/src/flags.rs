use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use freetype::ffi;

bitflags! {
    /// Flags passed to `FT_Load_Glyph`.
    ///
    /// The `TARGET_*` values select a hinting algorithm and share one 4-bit
    /// field, so or-ing two of them yields a third (`TARGET_LIGHT |
    /// TARGET_MONO == TARGET_LCD`). Pick the target with
    /// [`LoadFlags::with_target`] instead.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadFlags: i32 {
        const DEFAULT = 0;
        const NO_SCALE = 1 << 0;
        const NO_HINTING = 1 << 1;
        const RENDER = 1 << 2;
        const NO_BITMAP = 1 << 3;
        const VERTICAL_LAYOUT = 1 << 4;
        const FORCE_AUTOHINT = 1 << 5;
        const CROP_BITMAP = 1 << 6;
        const PEDANTIC = 1 << 7;
        const IGNORE_GLOBAL_ADVANCE_WIDTH = 1 << 9;
        const NO_RECURSE = 1 << 10;
        const IGNORE_TRANSFORM = 1 << 11;
        const MONOCHROME = 1 << 12;
        const LINEAR_DESIGN = 1 << 13;
        const NO_AUTOHINT = 1 << 15;

        const TARGET_NORMAL = 0 << 16;
        const TARGET_LIGHT = 1 << 16;
        const TARGET_MONO = 2 << 16;
        const TARGET_LCD = 3 << 16;
        const TARGET_LCD_V = 4 << 16;

        const COLOR = 1 << 20;
        const COMPUTE_METRICS = 1 << 21;
        const BITMAP_METRICS_ONLY = 1 << 22;
    }
}

const TARGET_MASK: i32 = 0xF << 16;

impl Default for LoadFlags {
    fn default() -> Self {
        LoadFlags::DEFAULT
    }
}

impl LoadFlags {
    /// The hinting target matching a render mode, so that hinting and
    /// rasterization agree.
    pub fn target_for(mode: RenderMode) -> LoadFlags {
        match mode {
            RenderMode::Normal | RenderMode::Sdf => LoadFlags::TARGET_NORMAL,
            RenderMode::Light => LoadFlags::TARGET_LIGHT,
            RenderMode::Mono => LoadFlags::TARGET_MONO,
            RenderMode::Lcd => LoadFlags::TARGET_LCD,
            RenderMode::LcdV => LoadFlags::TARGET_LCD_V,
        }
    }

    /// Replace the hinting target field with the one matching `mode`,
    /// keeping every other flag.
    pub fn with_target(self, mode: RenderMode) -> LoadFlags {
        LoadFlags::from_bits_retain((self.bits() & !TARGET_MASK) | Self::target_for(mode).bits())
    }

    /// The render mode whose hinting target is selected.
    pub fn target(self) -> RenderMode {
        match (self.bits() & TARGET_MASK) >> 16 {
            1 => RenderMode::Light,
            2 => RenderMode::Mono,
            3 => RenderMode::Lcd,
            4 => RenderMode::LcdV,
            _ => RenderMode::Normal,
        }
    }

    pub(crate) fn to_raw(self) -> ffi::FT_Int32 {
        self.bits()
    }
}

/// Rasterization mode for `FT_Render_Glyph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum RenderMode {
    /// 8-bit anti-aliased coverage.
    #[default]
    Normal = 0,
    /// Anti-aliased with light hinting.
    Light = 1,
    /// 1-bit monochrome.
    Mono = 2,
    /// Horizontal subpixel, three samples per pixel.
    Lcd = 3,
    /// Vertical subpixel, three rows per pixel.
    LcdV = 4,
    /// Signed distance field.
    Sdf = 5,
}

impl RenderMode {
    pub(crate) fn to_raw(self) -> ffi::FT_Render_Mode {
        self as ffi::FT_Render_Mode
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Normal => "normal",
            RenderMode::Light => "light",
            RenderMode::Mono => "mono",
            RenderMode::Lcd => "lcd",
            RenderMode::LcdV => "lcd-v",
            RenderMode::Sdf => "sdf",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(RenderMode::Normal),
            "light" => Ok(RenderMode::Light),
            "mono" | "monochrome" => Ok(RenderMode::Mono),
            "lcd" => Ok(RenderMode::Lcd),
            "lcd-v" | "lcd_v" | "lcdv" => Ok(RenderMode::LcdV),
            "sdf" => Ok(RenderMode::Sdf),
            other => Err(format!("unknown render mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_zero() {
        assert_eq!(LoadFlags::default().bits(), 0);
        assert!(LoadFlags::default().is_empty());
    }

    #[test]
    fn flag_values_match_freetype() {
        assert_eq!(LoadFlags::NO_HINTING.bits(), 0x2);
        assert_eq!(LoadFlags::FORCE_AUTOHINT.bits(), 0x20);
        assert_eq!(LoadFlags::NO_AUTOHINT.bits(), 0x8000);
        assert_eq!(LoadFlags::TARGET_LCD.bits(), 0x30000);
        assert_eq!(LoadFlags::COLOR.bits(), 0x100000);
    }

    #[test]
    fn target_follows_render_mode() {
        assert_eq!(LoadFlags::target_for(RenderMode::Mono), LoadFlags::TARGET_MONO);
        assert_eq!(LoadFlags::target_for(RenderMode::LcdV), LoadFlags::TARGET_LCD_V);
        assert_eq!(LoadFlags::target_for(RenderMode::Normal).bits(), 0);
    }

    #[test]
    fn with_target_replaces_the_previous_target() {
        // Or-ing the raw targets collides with a third one.
        assert_eq!(LoadFlags::TARGET_LIGHT | LoadFlags::TARGET_MONO, LoadFlags::TARGET_LCD);

        let flags = (LoadFlags::TARGET_LIGHT | LoadFlags::NO_HINTING).with_target(RenderMode::Mono);
        assert_eq!(flags, LoadFlags::TARGET_MONO | LoadFlags::NO_HINTING);
        assert_eq!(flags.target(), RenderMode::Mono);

        let flags = LoadFlags::TARGET_LCD_V.with_target(RenderMode::Lcd);
        assert_eq!(flags.bits(), LoadFlags::TARGET_LCD.bits());

        let flags = (LoadFlags::TARGET_LCD | LoadFlags::COLOR).with_target(RenderMode::Normal);
        assert_eq!(flags, LoadFlags::COLOR);
        assert_eq!(flags.target(), RenderMode::Normal);
    }

    #[test]
    fn render_mode_parses_config_strings() {
        assert_eq!("Normal".parse::<RenderMode>(), Ok(RenderMode::Normal));
        assert_eq!("monochrome".parse::<RenderMode>(), Ok(RenderMode::Mono));
        assert_eq!("lcd_v".parse::<RenderMode>(), Ok(RenderMode::LcdV));
        assert!("subpixel".parse::<RenderMode>().is_err());
        for mode in [RenderMode::Light, RenderMode::Lcd, RenderMode::Sdf] {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
    }
}
