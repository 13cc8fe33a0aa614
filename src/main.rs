//! rune-glyph: inspect how FreeType rasterizes a string.
//!
//! Usage: `rune-glyph [FONT] [TEXT]`
//!
//! The font falls back to `[font] path` in `rune.toml` (or `RUNE_FONT`);
//! sizing and render settings come from the same configuration.

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rune_config::RuneConfig;
use rune_freetype::{Bitmap, FtError, Library, LoadFlags, RenderMode};
use std::path::PathBuf;

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let mut config = RuneConfig::load();
    let mut args = std::env::args().skip(1);
    if let Some(font) = args.next() {
        config.font.path = Some(PathBuf::from(font));
    }
    let text = args.next().unwrap_or_else(|| "Rune".to_string());

    run(&config, &text)
}

fn run(config: &RuneConfig, text: &str) -> Result<()> {
    let font_path = config
        .font
        .path
        .as_ref()
        .ok_or_else(|| anyhow!("no font given: pass a path or set [font] path in rune.toml"))?;
    let mode: RenderMode = config.raster.render_mode.parse().map_err(|e: String| anyhow!(e))?;
    let flags = load_flags(config, mode);
    let ramp: Vec<char> = config.output.ramp.chars().collect();

    let library = Library::init().context("failed to initialize FreeType")?;
    let (major, minor, patch) = library.version();
    info!("FreeType {}.{}.{}", major, minor, patch);

    let mut face = library
        .new_face(font_path, config.font.face_index)
        .with_context(|| format!("failed to open {}", font_path.display()))?;
    face.set_char_size_pt(config.raster.point_size, config.raster.dpi)
        .with_context(|| format!("unsupported size {}pt", config.raster.point_size))?;

    println!(
        "{} {} (face {} of {}, {} glyphs)",
        face.family_name().unwrap_or_default(),
        face.style_name().unwrap_or_default(),
        face.face_index(),
        face.num_faces(),
        face.num_glyphs()
    );
    if let Some(size) = face.size_metrics() {
        println!(
            "{}pt @ {}dpi: ascender {:.1}px, descender {:.1}px, line height {:.1}px, max advance {:.1}px",
            config.raster.point_size,
            config.raster.dpi,
            size.ascender_px(),
            size.descender_px(),
            size.line_height_px(),
            size.max_advance_px()
        );
    }

    let mut previous = None;
    for ch in text.chars() {
        let index = match face.char_index_for(ch) {
            Ok(index) => index,
            Err(FtError::InvalidCharCode { code }) => {
                warn!("U+{:04X} is not covered by this font", code);
                println!("\n{:?}: missing", ch);
                previous = None;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(left) = previous {
            let kerning = face.kerning(left, index)?;
            if kerning.x != 0 {
                println!("\nkerning before {:?}: {:.1}px", ch, kerning.x_px());
            }
        }
        previous = Some(index);

        let mut glyph = face
            .load_glyph(index, flags)
            .with_context(|| format!("failed to load glyph {} for {:?}", index, ch))?;
        glyph
            .render(mode)
            .with_context(|| format!("failed to render {:?}", ch))?;

        let metrics = glyph.metrics();
        let bitmap = glyph.bitmap();
        println!(
            "\n{:?}: glyph {}, advance {:.1}px, bitmap {}x{} at ({}, {})",
            ch,
            index,
            metrics.advance_px(),
            bitmap.pixel_width(),
            bitmap.pixel_rows(),
            glyph.bitmap_left(),
            glyph.bitmap_top()
        );
        for line in draw(&bitmap, &ramp) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn load_flags(config: &RuneConfig, mode: RenderMode) -> LoadFlags {
    let mut flags = LoadFlags::DEFAULT;
    if !config.raster.hinting {
        flags |= LoadFlags::NO_HINTING;
    }
    if config.raster.force_autohint {
        flags |= LoadFlags::FORCE_AUTOHINT;
    }
    flags.with_target(mode)
}

fn draw(bitmap: &Bitmap<'_>, ramp: &[char]) -> Vec<String> {
    (0..bitmap.pixel_rows())
        .map(|y| {
            (0..bitmap.pixel_width())
                .map(|x| shade(bitmap.coverage(x, y).unwrap_or(0), ramp))
                .collect()
        })
        .collect()
}

/// Pick the ramp character for a coverage value.
fn shade(coverage: u8, ramp: &[char]) -> char {
    match ramp.len() {
        0 => ' ',
        len => ramp[coverage as usize * (len - 1) / 255],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_spans_the_ramp() {
        let ramp: Vec<char> = " .:#".chars().collect();
        assert_eq!(shade(0, &ramp), ' ');
        assert_eq!(shade(255, &ramp), '#');
        assert_eq!(shade(128, &ramp), '.');
        assert_eq!(shade(200, &[]), ' ');
    }

    #[test]
    fn load_flags_follow_config() {
        let mut config = RuneConfig::default();
        assert_eq!(load_flags(&config, RenderMode::Normal), LoadFlags::DEFAULT);

        config.raster.hinting = false;
        config.raster.force_autohint = true;
        let flags = load_flags(&config, RenderMode::Mono);
        assert!(flags.contains(LoadFlags::NO_HINTING));
        assert!(flags.contains(LoadFlags::FORCE_AUTOHINT));
        assert_eq!(flags.target(), RenderMode::Mono);

        // A light target never leaks into an LCD one.
        let flags = load_flags(&config, RenderMode::Lcd);
        assert_eq!(flags.target(), RenderMode::Lcd);
        assert!(!flags.contains(LoadFlags::TARGET_LCD_V));
    }

    #[test]
    fn missing_font_is_reported() {
        let config = RuneConfig::default();
        let err = run(&config, "A").unwrap_err();
        assert!(err.to_string().contains("no font given"));
    }
}
