//! Build script for prospector-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates scanner.toml at compile time

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
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate scanner.toml with the full TOML parser
///
/// The firmware's own reader only understands a subset; anything it would
/// misread should fail the build instead.
fn validate_config() {
    println!("cargo:rerun-if-changed=scanner.toml");

    let config_path = Path::new("scanner.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read scanner.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in scanner.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    check_int(&config, "brightness", "manual", 1, 100, &mut errors);
    check_int(&config, "brightness", "timeout", 0, 100, &mut errors);
    check_int(&config, "brightness", "fixed", 0, 100, &mut errors);
    check_int(&config, "brightness", "sensor_min", 1, 100, &mut errors);
    check_int(&config, "brightness", "sensor_max", 1, 100, &mut errors);
    check_int(&config, "brightness", "sensor_dark", 0, 65535, &mut errors);
    check_int(&config, "brightness", "sensor_bright", 0, 65535, &mut errors);
    check_int(&config, "layers", "max_layers", 4, 10, &mut errors);
    check_int(&config, "layers", "slide_max", 1, 255, &mut errors);
    check_bool(&config, "display", "battery_visible", &mut errors);
    check_bool(&config, "display", "inverted_backlight", &mut errors);
    check_bool(&config, "brightness", "auto", &mut errors);
    check_bool(&config, "layers", "slide_mode", &mut errors);
    check_channel(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in scanner.toml", &errors);
    }

    println!("cargo:warning=scanner.toml validated successfully");
}

fn lookup<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match lookup(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = lookup(config, section, key) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

fn check_channel(config: &toml::Value, errors: &mut Vec<String>) {
    match lookup(config, "system", "channel") {
        None => {}
        Some(toml::Value::Integer(v)) if (0..=10).contains(v) => {}
        Some(toml::Value::String(s)) if s.eq_ignore_ascii_case("all") => {}
        Some(_) => errors.push("[system] channel must be 0-9, 10 or \"all\"".to_string()),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
