//! Build script for clepsydra-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections device.toml must contain, with the keys each one accepts
const SECTIONS: &[(&str, &[&str])] = &[
    ("encoder", &["min", "max", "step", "reverse", "half_step"]),
    ("button", &["debounce_ms", "double_click_ms", "long_press_ms"]),
    (
        "timer",
        &[
            "step_s",
            "poll_ms",
            "idle_timeout_ms",
            "wake_settle_ms",
            "countdown_settle_ms",
            "splash_s",
            "splash_ms",
        ],
    ),
    ("alarm", &["repetitions", "tone_tick_ms", "blink_on_ms", "blink_off_ms"]),
    ("tone", &["song", "ticks_per_beat"]),
];

/// Longest duration the display can show (99:59)
const MAX_SECONDS: i64 = 5999;

/// Longest song text the firmware can hold
const MAX_SONG_LEN: usize = 160;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a device.toml configuration file.           ║\n\
            ║  Please create one in the clepsydra-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_sections(&config);
    validate_ranges(&config);

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a boxed list of errors
fn fail(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Check that every section is present and holds only known keys
///
/// The firmware's own parser rejects unknown names at run time and falls
/// back to defaults, so catching them here keeps a typo from going unnoticed.
fn validate_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for name in root.keys() {
        if !SECTIONS.iter().any(|(section, _)| section == name) {
            errors.push(format!("unknown section [{}]", name));
        }
    }

    for (section, keys) in SECTIONS {
        match root.get(*section) {
            Some(toml::Value::Table(table)) => {
                for key in table.keys() {
                    if !keys.contains(&key.as_str()) {
                        errors.push(format!("[{}] unknown key '{}'", section, key));
                    }
                }
            }
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("missing [{}] section", section)),
        }
    }

    fail("Invalid sections in device.toml", &errors);
}

/// Look up an integer, recording a type error if the key holds anything else
fn int(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

/// Check numeric ranges and cross-field constraints
fn validate_ranges(config: &toml::Value) {
    let mut errors = Vec::new();

    // Encoder range
    let min = int(config, "encoder", "min", &mut errors).unwrap_or(0);
    let max = int(config, "encoder", "max", &mut errors).unwrap_or(MAX_SECONDS);
    if min >= max {
        errors.push("[encoder] min must be below max".to_string());
    }
    if min < 0 || max > MAX_SECONDS {
        errors.push(format!("[encoder] range must lie within 0-{}", MAX_SECONDS));
    }
    if let Some(step) = int(config, "encoder", "step", &mut errors) {
        if step <= 0 {
            errors.push("[encoder] step must be positive".to_string());
        }
    }

    for key in ["debounce_ms", "double_click_ms", "long_press_ms"] {
        if let Some(v) = int(config, "button", key, &mut errors) {
            if v < 0 || v > 10_000 {
                errors.push(format!("[button] {} must be 0-10000", key));
            }
        }
    }

    if let Some(step) = int(config, "timer", "step_s", &mut errors) {
        if step <= 0 {
            errors.push("[timer] step_s must be positive".to_string());
        }
    }
    if let Some(poll) = int(config, "timer", "poll_ms", &mut errors) {
        if !(10..=50).contains(&poll) {
            errors.push("[timer] poll_ms must be 10-50".to_string());
        }
    }
    if let Some(timeout) = int(config, "timer", "idle_timeout_ms", &mut errors) {
        if timeout <= 0 {
            errors.push("[timer] idle_timeout_ms must be positive".to_string());
        }
    }
    if let Some(splash) = int(config, "timer", "splash_s", &mut errors) {
        if !(0..=MAX_SECONDS).contains(&splash) {
            errors.push(format!("[timer] splash_s must be 0-{}", MAX_SECONDS));
        }
    }

    if let Some(reps) = int(config, "alarm", "repetitions", &mut errors) {
        if !(1..=255).contains(&reps) {
            errors.push("[alarm] repetitions must be 1-255".to_string());
        }
    }
    if let Some(tick) = int(config, "alarm", "tone_tick_ms", &mut errors) {
        if tick <= 0 {
            errors.push("[alarm] tone_tick_ms must be positive".to_string());
        }
    }

    if let Some(tpb) = int(config, "tone", "ticks_per_beat", &mut errors) {
        if !(1..=255).contains(&tpb) {
            errors.push("[tone] ticks_per_beat must be 1-255".to_string());
        }
    }
    match config.get("tone").and_then(|t| t.get("song")) {
        Some(toml::Value::String(song)) => {
            if song.len() > MAX_SONG_LEN {
                errors.push(format!("[tone] song longer than {} bytes", MAX_SONG_LEN));
            }
            if song.split(';').any(|n| n.split_whitespace().count() != 4) {
                errors.push("[tone] each note needs 'start note beats instrument'".to_string());
            }
        }
        Some(_) => errors.push("[tone] song must be a string".to_string()),
        None => {}
    }

    fail("Invalid values in device.toml", &errors);
}
