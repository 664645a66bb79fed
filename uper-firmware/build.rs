//! Build script for uper-firmware
//!
//! - Sets up linker search paths for memory.x and device.x
//! - Validates board.toml at compile time and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let board = validate_config();
    generate_board_constants(&out_dir, &board);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    for (name, contents) in [
        ("memory.x", &include_bytes!("memory.x")[..]),
        ("device.x", &include_bytes!("device.x")[..]),
    ] {
        let mut f = File::create(out_dir.join(name)).unwrap();
        f.write_all(contents).unwrap();
    }

    // Tell rustc where to find memory.x / device.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=device.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board settings
struct Board {
    system_clock_hz: u32,
    baudrate: u32,
    interrupt_priority: u8,
    keep_debug_pins: bool,
}

/// Validate board.toml configuration at compile time
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the uper-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let system_clock_hz = integer(&config, "clock", "system_clock_hz", &mut errors)
        .and_then(|hz| check_range(hz, 1_000_000, 50_000_000, "[clock] system_clock_hz", &mut errors));
    let baudrate = integer(&config, "link", "baudrate", &mut errors)
        .and_then(|baud| check_range(baud, 1_200, 3_000_000, "[link] baudrate", &mut errors));
    let interrupt_priority = integer(&config, "gpio", "interrupt_priority", &mut errors)
        .and_then(|prio| check_range(prio, 0, 3, "[gpio] interrupt_priority", &mut errors));
    let keep_debug_pins = match config.get("gpio").and_then(|g| g.get("keep_debug_pins")) {
        Some(toml::Value::Boolean(keep)) => Some(*keep),
        Some(_) => {
            errors.push("[gpio] keep_debug_pins must be true or false".to_string());
            None
        }
        None => Some(false),
    };

    if let (Some(hz), Some(baud)) = (system_clock_hz, baudrate) {
        if hz / (16 * baud) == 0 {
            errors.push(format!(
                "[link] baudrate {} is too fast for a {} Hz clock",
                baud, hz
            ));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");

    // All present: any missing value pushed an error above
    Board {
        system_clock_hz: system_clock_hz.unwrap_or_default() as u32,
        baudrate: baudrate.unwrap_or_default() as u32,
        interrupt_priority: interrupt_priority.unwrap_or_default() as u8,
        keep_debug_pins: keep_debug_pins.unwrap_or_default(),
    }
}

/// Look up a required integer `[section] key`
fn integer(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) => Some(*value),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

fn check_range(value: i64, min: i64, max: i64, name: &str, errors: &mut Vec<String>) -> Option<i64> {
    if (min..=max).contains(&value) {
        Some(value)
    } else {
        errors.push(format!("{} must be {}-{}", name, min, max));
        None
    }
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

/// Write the validated settings as Rust constants
fn generate_board_constants(out_dir: &Path, board: &Board) {
    let mut f = File::create(out_dir.join("board.rs")).unwrap();
    writeln!(f, "/// Core clock frequency").unwrap();
    writeln!(f, "pub const SYSTEM_CLOCK_HZ: u32 = {};", board.system_clock_hz).unwrap();
    writeln!(f, "/// Host link baud rate").unwrap();
    writeln!(f, "pub const LINK_BAUDRATE: u32 = {};", board.baudrate).unwrap();
    writeln!(f, "/// NVIC priority of the pin interrupt lines").unwrap();
    writeln!(f, "pub const INTERRUPT_PRIORITY: u8 = {};", board.interrupt_priority).unwrap();
    writeln!(f, "/// Leave debug pins on their debug function at boot").unwrap();
    writeln!(f, "pub const KEEP_DEBUG_PINS: bool = {};", board.keep_debug_pins).unwrap();
}
