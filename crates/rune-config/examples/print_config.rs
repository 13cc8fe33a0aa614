/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Glyph Configuration ===\n");

    println!("Font Settings:");
    println!("  Path: {:?}", config.font.path);
    println!("  Face Index: {}", config.font.face_index);
    println!();

    println!("Raster Settings:");
    println!("  Point Size: {}", config.raster.point_size);
    println!("  DPI: {}", config.raster.dpi);
    println!("  Render Mode: {}", config.raster.render_mode);
    println!("  Hinting: {}", config.raster.hinting);
    println!("  Force Autohint: {}", config.raster.force_autohint);
    println!();

    println!("Output Settings:");
    println!("  Ramp: {:?}", config.output.ramp);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
