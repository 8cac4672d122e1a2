//! Build script for traverse-firmware
//!
//! - Sets up linker search paths and scripts for the RP2040
//! - Validates stage.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate stage.toml at compile time
///
/// Syntax is checked with the full `toml` parser first, then the file is
/// run through the same parser the firmware uses at boot, so a config the
/// firmware would reject never gets flashed.
fn validate_config() {
    println!("cargo:rerun-if-changed=stage.toml");

    let config_path = Path::new("stage.toml");

    if !config_path.exists() {
        fail(
            "stage.toml not found!",
            &[
                "The firmware requires a stage.toml configuration file".to_string(),
                "in the traverse-firmware directory.".to_string(),
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read stage.toml", &[e.to_string()]),
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in stage.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    validate_selector_tables(&value);

    match traverse_core::config::parse_config(&content) {
        Ok(config) => {
            println!(
                "cargo:warning=stage.toml validated: {} speeds, debounce {} ticks",
                config.selector.channel_count(),
                config.selector.max_count
            );
        }
        Err(e) => fail("Invalid stage configuration", &[format!("{:?}", e)]),
    }
}

/// Check the selector arrays the firmware parser reads line by line
fn validate_selector_tables(config: &toml::Value) {
    let mut errors = Vec::new();

    let selector = match config.get("selector") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => fail(
            "Invalid selector configuration",
            &["[selector] must be a table".to_string()],
        ),
        None => return,
    };

    let pins = selector.get("pins").and_then(|v| v.as_array());
    let speeds = selector.get("speeds").and_then(|v| v.as_array());

    if let Some(pins) = pins {
        for (i, pin) in pins.iter().enumerate() {
            if !pin.is_str() {
                errors.push(format!("pins[{}] must be a string like \"^!gpio7\"", i));
            }
        }
    }

    if let Some(speeds) = speeds {
        for (i, speed) in speeds.iter().enumerate() {
            let ok = match speed {
                toml::Value::Integer(v) => *v > 0,
                toml::Value::Float(v) => *v > 0.0,
                _ => false,
            };
            if !ok {
                errors.push(format!("speeds[{}] must be a positive number (mm/s)", i));
            }
        }
    }

    if let (Some(pins), Some(speeds)) = (pins, speeds) {
        if pins.len() != speeds.len() {
            errors.push(format!(
                "{} pins but {} speeds; each speed needs exactly one pin",
                pins.len(),
                speeds.len()
            ));
        }
    }

    if !errors.is_empty() {
        fail("Invalid selector configuration", &errors);
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
