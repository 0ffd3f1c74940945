//! Build script for spotify-cli.
//!
//! Copies the configuration template into the user's local data directory so
//! that a ready-to-edit example sits next to the place where the CLI looks for
//! its `config.json`.

use std::{env, fs, path::PathBuf};

/// Copies `config.example.json` from the crate root to the local data directory.
///
/// # Destination Location
///
/// - Linux: `~/.local/share/spotify-cli/config.example.json`
/// - macOS: `~/Library/Application Support/spotify-cli/config.example.json`
/// - Windows: `%LOCALAPPDATA%/spotify-cli/config.example.json`
///
/// A missing template only produces a cargo warning; directory creation and
/// write failures abort the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=config.example.json");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join("config.example.json");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotify-cli");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join("config.example.json"), contents)?;
    } else {
        println!(
            "cargo:warning=config.example.json not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
