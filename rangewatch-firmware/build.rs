//! Build script for rangewatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates the `BOARD` constant from it

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sensor tables in slot order
const SENSORS: [&str; 4] = ["a", "b", "c", "d"];

/// Highest RP2040 GPIO number
const MAX_GPIO: u32 = 29;

/// Calibration keys and their expected kind
const CALIBRATION_KEYS: [(&str, Kind); 8] = [
    ("tick_divisor", Kind::U16),
    ("tick_offset", Kind::U16),
    ("cm_divisor", Kind::U16),
    ("baseline_cm", Kind::Float),
    ("trigger_pulse_us", Kind::U32),
    ("echo_start_timeout_us", Kind::U32),
    ("poll_interval_us", Kind::U32),
    ("max_echo_ticks", Kind::U16),
];

/// Timing keys that may be overridden
const TIMING_KEYS: [(&str, Kind); 16] = [
    ("power_up_settle_ms", Kind::U32),
    ("display_init_settle_ms", Kind::U32),
    ("timer_setup_settle_ms", Kind::U32),
    ("legend_settle_ms", Kind::U32),
    ("pass_start_ms", Kind::U32),
    ("slot_start_ms", Kind::U32),
    ("angle_settle_ms", Kind::U32),
    ("digit_step_settle_ms", Kind::U32),
    ("alert_hold_ms", Kind::U32),
    ("alert_shift_settle_ms", Kind::U32),
    ("field_settle_ms", Kind::U32),
    ("chirp_on_ms", Kind::U32),
    ("chirp_off_ms", Kind::U32),
    ("chirp_count", Kind::U8),
    ("slot_settle_ms", Kind::U32),
    ("pass_settle_ms", Kind::U32),
];

#[derive(Clone, Copy)]
enum Kind {
    U8,
    U16,
    U32,
    Float,
}

/// A parsed pin reference
#[derive(Clone, Copy)]
struct Pin {
    gpio: u32,
    inverted: bool,
}

fn main() {
    setup_linker();
    let board = validate_config();
    generate_board(&board);
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board description, ready for code generation
struct Board {
    sensors: Vec<(Pin, Pin)>,
    lcd_rs: Pin,
    lcd_en: Pin,
    lcd_data: Vec<Pin>,
    enable_hold_us: u32,
    led: Pin,
    buzzer: Pin,
    calibration: BTreeMap<&'static str, String>,
    timing: BTreeMap<&'static str, String>,
}

/// Validate board.toml at compile time
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml describing its pins and      ║\n\
            ║  calibration. Create one in the rangewatch-firmware directory.   ║\n\
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
    let board = read_board(&config, &mut errors);
    check_duplicates(&board, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration in board.toml                ║\n\
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
    board
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

fn read_board(config: &toml::Value, errors: &mut Vec<String>) -> Board {
    let placeholder = Pin {
        gpio: 0,
        inverted: false,
    };

    let mut sensors = Vec::new();
    for name in SENSORS {
        let table = config.get("sensor").and_then(|s| s.get(name));
        if table.is_none() {
            errors.push(format!("Missing [sensor.{}] section", name));
        }
        let mut line = |key: &str| {
            let field = format!("sensor.{}.{}", name, key);
            match table.and_then(|t| t.get(key)) {
                Some(v) => parse_pin(v, &field, false, errors),
                None => {
                    if table.is_some() {
                        errors.push(format!("{}: missing", field));
                    }
                    placeholder
                }
            }
        };
        let trigger = line("trigger");
        let echo = line("echo");
        sensors.push((trigger, echo));
    }

    let lcd = config.get("lcd");
    if lcd.is_none() {
        errors.push("Missing [lcd] section".to_string());
    }
    let mut lcd_pin = |key: &str| {
        let field = format!("lcd.{}", key);
        match lcd.and_then(|t| t.get(key)) {
            Some(v) => parse_pin(v, &field, false, errors),
            None => {
                if lcd.is_some() {
                    errors.push(format!("{}: missing", field));
                }
                placeholder
            }
        }
    };
    let lcd_rs = lcd_pin("rs");
    let lcd_en = lcd_pin("en");

    let lcd_data = match lcd.and_then(|t| t.get("data")).and_then(|d| d.as_array()) {
        Some(lines) if lines.len() == 4 => lines
            .iter()
            .enumerate()
            .map(|(i, v)| parse_pin(v, &format!("lcd.data[{}]", i), false, errors))
            .collect(),
        _ => {
            if lcd.is_some() {
                errors.push("lcd.data: expected four pins (D4..D7)".to_string());
            }
            vec![placeholder; 4]
        }
    };

    let enable_hold_us = match lcd.and_then(|t| t.get("enable_hold_us")) {
        None => 10_000,
        Some(v) => match v.as_integer() {
            Some(us) if us > 0 && us <= u32::MAX as i64 => us as u32,
            _ => {
                errors.push("lcd.enable_hold_us: must be a positive integer".to_string());
                1
            }
        },
    };

    let alarm = config.get("alarm");
    if alarm.is_none() {
        errors.push("Missing [alarm] section".to_string());
    }
    let mut alarm_pin = |key: &str| {
        let field = format!("alarm.{}", key);
        match alarm.and_then(|t| t.get(key)) {
            Some(v) => parse_pin(v, &field, true, errors),
            None => {
                if alarm.is_some() {
                    errors.push(format!("{}: missing", field));
                }
                placeholder
            }
        }
    };
    let led = alarm_pin("led");
    let buzzer = alarm_pin("buzzer");

    let calibration = read_overrides(config, "calibration", &CALIBRATION_KEYS, errors);
    check_calibration(&calibration, errors);
    let timing = read_overrides(config, "timing", &TIMING_KEYS, errors);

    Board {
        sensors,
        lcd_rs,
        lcd_en,
        lcd_data,
        enable_hold_us,
        led,
        buzzer,
        calibration,
        timing,
    }
}

/// Parse `"gpioN"` or `"!gpioN"`
fn parse_pin(
    value: &toml::Value,
    field: &str,
    allow_inverted: bool,
    errors: &mut Vec<String>,
) -> Pin {
    let fallback = Pin {
        gpio: 0,
        inverted: false,
    };
    let Some(text) = value.as_str() else {
        errors.push(format!("{}: expected a pin name like \"gpio4\"", field));
        return fallback;
    };

    let (inverted, name) = match text.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if inverted && !allow_inverted {
        errors.push(format!("{}: only alarm outputs can be inverted", field));
    }

    match name.strip_prefix("gpio").and_then(|n| n.parse::<u32>().ok()) {
        Some(gpio) if gpio <= MAX_GPIO => Pin { gpio, inverted },
        Some(gpio) => {
            errors.push(format!("{}: gpio{} out of range (0-{})", field, gpio, MAX_GPIO));
            fallback
        }
        None => {
            errors.push(format!("{}: invalid pin name '{}'", field, text));
            fallback
        }
    }
}

/// Read a table of numeric overrides, checking names and ranges
fn read_overrides(
    config: &toml::Value,
    section: &str,
    keys: &[(&'static str, Kind)],
    errors: &mut Vec<String>,
) -> BTreeMap<&'static str, String> {
    let mut values = BTreeMap::new();
    let Some(table) = config.get(section).and_then(|t| t.as_table()) else {
        return values;
    };

    for (key, value) in table {
        let Some(&(name, kind)) = keys.iter().find(|(k, _)| *k == key.as_str()) else {
            errors.push(format!("{}.{}: unknown key", section, key));
            continue;
        };
        let field = format!("{}.{}", section, key);
        let literal = match kind {
            Kind::Float => match value.as_float().or_else(|| value.as_integer().map(|i| i as f64)) {
                Some(f) => format!("{:?}", f),
                None => {
                    errors.push(format!("{}: expected a number", field));
                    continue;
                }
            },
            Kind::U8 | Kind::U16 | Kind::U32 => {
                let max = match kind {
                    Kind::U8 => u8::MAX as i64,
                    Kind::U16 => u16::MAX as i64,
                    _ => u32::MAX as i64,
                };
                match value.as_integer() {
                    Some(i) if (0..=max).contains(&i) => i.to_string(),
                    _ => {
                        errors.push(format!("{}: expected an integer in 0-{}", field, max));
                        continue;
                    }
                }
            }
        };
        values.insert(name, literal);
    }
    values
}

/// Reject calibration that cannot convert or time out
fn check_calibration(calibration: &BTreeMap<&'static str, String>, errors: &mut Vec<String>) {
    for key in [
        "tick_divisor",
        "cm_divisor",
        "trigger_pulse_us",
        "echo_start_timeout_us",
        "max_echo_ticks",
    ] {
        if calibration.get(key).map(String::as_str) == Some("0") {
            errors.push(format!("calibration.{}: must not be zero", key));
        }
    }
    if let Some(baseline) = calibration.get("baseline_cm") {
        match baseline.parse::<f64>() {
            Ok(b) if b > 0.0 && b.is_finite() => {}
            _ => errors.push("calibration.baseline_cm: must be positive".to_string()),
        }
    }
}

fn check_duplicates(board: &Board, errors: &mut Vec<String>) {
    let mut seen: BTreeMap<u32, String> = BTreeMap::new();
    let mut roles: Vec<(u32, String)> = Vec::new();

    for (name, (trigger, echo)) in SENSORS.iter().zip(&board.sensors) {
        roles.push((trigger.gpio, format!("sensor.{}.trigger", name)));
        roles.push((echo.gpio, format!("sensor.{}.echo", name)));
    }
    roles.push((board.lcd_rs.gpio, "lcd.rs".to_string()));
    roles.push((board.lcd_en.gpio, "lcd.en".to_string()));
    for (i, pin) in board.lcd_data.iter().enumerate() {
        roles.push((pin.gpio, format!("lcd.data[{}]", i)));
    }
    roles.push((board.led.gpio, "alarm.led".to_string()));
    roles.push((board.buzzer.gpio, "alarm.buzzer".to_string()));

    for (gpio, role) in roles {
        if let Some(previous) = seen.get(&gpio) {
            errors.push(format!("gpio{} used by both {} and {}", gpio, previous, role));
        } else {
            seen.insert(gpio, role);
        }
    }
}

/// Write `$OUT_DIR/board_config.rs`
fn generate_board(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let sensors = board
        .sensors
        .iter()
        .map(|(trigger, echo)| {
            format!(
                "        SensorPins {{ trigger: {}, echo: {} }},\n",
                trigger.gpio, echo.gpio
            )
        })
        .collect::<String>();

    let data = board
        .lcd_data
        .iter()
        .map(|p| p.gpio.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let overrides = |values: &BTreeMap<&'static str, String>| {
        values
            .iter()
            .map(|(k, v)| format!("        {}: {},\n", k, v))
            .collect::<String>()
    };

    let code = format!(
        "// Generated from board.toml by build.rs\n\
         \n\
         pub const BOARD: BoardConfig = BoardConfig {{\n\
         \x20   sensors: [\n{sensors}    ],\n\
         \x20   lcd: LcdConfig {{\n\
         \x20       rs: {rs},\n\
         \x20       en: {en},\n\
         \x20       data: [{data}],\n\
         \x20       enable_hold_us: {hold},\n\
         \x20   }},\n\
         \x20   alarm: AlarmPins {{\n\
         \x20       led: {led},\n\
         \x20       buzzer: {buzzer},\n\
         \x20   }},\n\
         \x20   calibration: RangingCalibration {{\n{calibration}        ..RangingCalibration::MICROSECOND_TICKS\n\
         \x20   }},\n\
         \x20   timing: PresentationTiming {{\n{timing}        ..PresentationTiming::REFERENCE\n\
         \x20   }},\n\
         }};\n",
        sensors = sensors,
        rs = board.lcd_rs.gpio,
        en = board.lcd_en.gpio,
        data = data,
        hold = board.enable_hold_us,
        led = pin_config(board.led),
        buzzer = pin_config(board.buzzer),
        calibration = overrides(&board.calibration),
        timing = overrides(&board.timing),
    );

    fs::write(out_dir.join("board_config.rs"), code).unwrap();
}

fn pin_config(pin: Pin) -> String {
    if pin.inverted {
        format!("PinConfig::inverted({})", pin.gpio)
    } else {
        format!("PinConfig::new({})", pin.gpio)
    }
}
