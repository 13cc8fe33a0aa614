//! Rune glyph configuration system
//!
//! This crate provides centralized configuration for the glyph tools,
//! loading settings from `rune.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RuneConfig {
    /// Which font to open
    pub font: FontConfig,
    /// Sizing and rasterization settings
    pub raster: RasterConfig,
    /// Text output settings
    pub output: OutputConfig,
}

/// Font selection
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Path to the font file (.ttf, .otf, .ttc, ...)
    pub path: Option<PathBuf>,
    /// Face within a font collection
    pub face_index: usize,
}

/// Rasterization configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RasterConfig {
    /// Character size in whole points
    pub point_size: u32,
    /// Device resolution in dots per inch
    pub dpi: u32,
    /// One of normal, light, mono, lcd, lcd-v, sdf
    pub render_mode: String,
    /// Apply hinting when loading glyphs
    pub hinting: bool,
    /// Prefer the auto-hinter over the font's own hints
    pub force_autohint: bool,
}

/// Text output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Characters from lightest to darkest used to draw coverage
    pub ramp: String,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            point_size: 12,
            dpi: 96,
            render_mode: "normal".to_string(),
            hinting: true,
            force_autohint: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ramp: " .:-=+*#%@".to_string(),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    ///
    /// # Returns
    /// * `Ok(RuneConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable numeric values are ignored.
    pub fn merge_with_env(&mut self) {
        // Font settings
        if let Ok(path) = std::env::var("RUNE_FONT") {
            self.font.path = Some(PathBuf::from(path));
        }
        if let Ok(val) = std::env::var("RUNE_FACE_INDEX") {
            if let Ok(index) = val.parse::<usize>() {
                self.font.face_index = index;
            }
        }

        // Raster settings
        if let Ok(val) = std::env::var("RUNE_POINT_SIZE") {
            if let Ok(size) = val.parse::<u32>() {
                self.raster.point_size = size;
            }
        }
        if let Ok(val) = std::env::var("RUNE_DPI") {
            if let Ok(dpi) = val.parse::<u32>() {
                self.raster.dpi = dpi;
            }
        }
        if let Ok(mode) = std::env::var("RUNE_RENDER_MODE") {
            self.raster.render_mode = mode;
        }
        if let Ok(val) = std::env::var("RUNE_HINTING") {
            self.raster.hinting = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_AUTOHINT") {
            self.raster.force_autohint = parse_flag(&val);
        }

        // Output settings
        if let Ok(ramp) = std::env::var("RUNE_RAMP") {
            if !ramp.is_empty() {
                self.output.ramp = ramp;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RuneConfig::default();
        assert_eq!(config.font.path, None);
        assert_eq!(config.font.face_index, 0);
        assert_eq!(config.raster.point_size, 12);
        assert_eq!(config.raster.dpi, 96);
        assert_eq!(config.raster.render_mode, "normal");
        assert!(config.raster.hinting);
        assert!(!config.raster.force_autohint);
        assert_eq!(config.output.ramp.chars().next(), Some(' '));
    }

    #[test]
    fn test_toml_serialization() {
        let config = RuneConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RuneConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[font]\npath = \"fonts/Inter.ttc\"\nface_index = 2\n\n[raster]\npoint_size = 18"
        )
        .unwrap();

        let config = RuneConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.font.path, Some(PathBuf::from("fonts/Inter.ttc")));
        assert_eq!(config.font.face_index, 2);
        assert_eq!(config.raster.point_size, 18);
        assert_eq!(config.raster.dpi, 96);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_invalid_file_reports_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[raster]\npoint_size = \"large\"").unwrap();
        let err = RuneConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.starts_with("Failed to parse config file"));

        let err = RuneConfig::load_from_file("/nonexistent/rune.toml").unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if rune.toml doesn't exist
        let config = RuneConfig::load_or_default();
        assert!(config.raster.point_size > 0);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_FONT", "/tmp/font.otf");
            std::env::set_var("RUNE_POINT_SIZE", "30");
            std::env::set_var("RUNE_DPI", "not-a-number");
            std::env::set_var("RUNE_HINTING", "false");
            std::env::set_var("RUNE_RENDER_MODE", "mono");
        }

        let mut config = RuneConfig::default();
        config.merge_with_env();

        assert_eq!(config.font.path, Some(PathBuf::from("/tmp/font.otf")));
        assert_eq!(config.raster.point_size, 30);
        assert_eq!(config.raster.dpi, 96);
        assert!(!config.raster.hinting);
        assert_eq!(config.raster.render_mode, "mono");

        // Clean up
        unsafe {
            std::env::remove_var("RUNE_FONT");
            std::env::remove_var("RUNE_POINT_SIZE");
            std::env::remove_var("RUNE_DPI");
            std::env::remove_var("RUNE_HINTING");
            std::env::remove_var("RUNE_RENDER_MODE");
        }
    }
}
