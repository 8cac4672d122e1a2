//! Simple TOML parser for stage configuration
//!
//! This is a minimal, allocation-free parser that handles only the subset
//! needed for the stage configuration. It does NOT support the full TOML
//! grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float, boolean)
//! - [section] headers
//! - Flat single-line arrays: speeds = [100, 150, 200]
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys

use heapless::Vec;

use super::hardware::{PinConfig, MAX_GPIO};
use super::types::{ConfigError, SelectionPolicy, StageConfig, MAX_CHANNELS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
    /// Parsed configuration is inconsistent
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Mechanics,
    Motion,
    Selector,
}

/// Parallel tables collected from the `[selector]` section
#[derive(Default)]
struct ChannelTables {
    pins: Option<Vec<PinConfig, MAX_CHANNELS>>,
    speeds: Option<Vec<f32, MAX_CHANNELS>>,
}

/// Parse TOML text into a validated [`StageConfig`]
///
/// Keys that are not present keep their [`StageConfig::default`] value.
/// The `pins` and `speeds` arrays are combined into channel records and
/// must have the same length.
pub fn parse_config(input: &str) -> Result<StageConfig, ParseError> {
    let mut config = StageConfig::new();
    let mut section = Section::Root;
    let mut tables = ChannelTables::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && !line.contains('=') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&header[1..header.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut tables)?;
        }
    }

    if tables.pins.is_some() || tables.speeds.is_some() {
        let pins = match tables.pins {
            Some(pins) => pins,
            None => config.selector.channels.iter().map(|c| c.pin).collect(),
        };
        let speeds = match tables.speeds {
            Some(speeds) => speeds,
            None => config.selector.channels.iter().map(|c| c.speed_mm_s).collect(),
        };
        config.selector.channels = super::SelectorConfig::channels_from_parallel(&pins, &speeds)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a section header like "selector"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "mechanics" => Ok(Section::Mechanics),
        "motion" => Ok(Section::Motion),
        "selector" => Ok(Section::Selector),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(s: &str) -> &str {
    let mut in_string = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return s[..i].trim(),
            _ => {}
        }
    }
    s.trim()
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a decimal value; integers are accepted
fn parse_float(value: &str) -> Result<f32, ParseError> {
    let value: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^!gpio7"
///
/// `!` marks the input active-low, `^` enables the internal pull-up.
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value.trim());
    let mut inverted = false;
    let mut pull_up = false;

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin > MAX_GPIO {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

/// Parse selection policy
fn parse_policy(value: &str) -> Result<SelectionPolicy, ParseError> {
    match parse_string(value) {
        "saturate" | "select_on_saturate" => Ok(SelectionPolicy::SelectOnSaturate),
        "release" | "select_on_release" => Ok(SelectionPolicy::SelectOnRelease),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Split a flat `[a, b, c]` array into trimmed items
fn array_items(value: &str) -> Result<impl Iterator<Item = &str>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    Ok(inner.split(',').map(str::trim).filter(|item| !item.is_empty()))
}

fn parse_pin_array(value: &str) -> Result<Vec<PinConfig, MAX_CHANNELS>, ParseError> {
    let mut pins = Vec::new();
    for item in array_items(value)? {
        pins.push(parse_pin(item)?).map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(pins)
}

fn parse_float_array(value: &str) -> Result<Vec<f32, MAX_CHANNELS>, ParseError> {
    let mut values = Vec::new();
    for item in array_items(value)? {
        values
            .push(parse_float(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(values)
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut StageConfig,
    tables: &mut ChannelTables,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "version" {
                config.version = parse_int(value)?;
            }
        }
        Section::Mechanics => {
            let m = &mut config.mechanics;
            match key {
                "pulley_diameter_mm" | "pulley_diameter" => {
                    m.pulley_diameter_mm = parse_float(value)?
                }
                "full_steps_per_rotation" | "steps_per_rev" => {
                    m.full_steps_per_rotation = parse_int(value)?
                }
                "microsteps" => m.microsteps = parse_int(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Motion => {
            let l = &mut config.limits;
            match key {
                "max_speed" | "max_speed_mm_s" => l.max_speed_mm_s = parse_float(value)?,
                "acceleration" | "acceleration_mm_s2" => l.acceleration_mm_s2 = parse_float(value)?,
                _ => {}
            }
        }
        Section::Selector => {
            let s = &mut config.selector;
            match key {
                "pins" => tables.pins = Some(parse_pin_array(value)?),
                "speeds" | "speeds_mm_s" => tables.speeds = Some(parse_float_array(value)?),
                "max_count" => s.max_count = parse_int(value)?,
                "policy" => s.policy = parse_policy(value)?,
                "initial_speed" | "initial_speed_mm_s" => {
                    s.initial_speed_mm_s = match parse_string(value) {
                        "max" => None,
                        v => Some(parse_float(v)?),
                    };
                }
                "tick_interval_us" => s.tick_interval_us = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = r#"
version = 1

[mechanics]
pulley_diameter_mm = 19.09
full_steps_per_rotation = 200
microsteps = 1

[motion]
max_speed = 500       # mm/s
acceleration = 800    # mm/s^2

[selector]
pins = ["^!gpio7", "^!gpio8", "^!gpio9", "^!gpio10", "^!gpio11", "^!gpio12"]
speeds = [100, 150, 200, 250, 300, 500]
max_count = 1000
policy = "saturate"
tick_interval_us = 1000
"#;

    #[test]
    fn test_reference_file_matches_defaults() {
        let config = parse_config(REFERENCE).unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), StageConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            StageConfig::default()
        );
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("gpio11").unwrap(), PinConfig::new(11));
        assert_eq!(parse_pin("\"!gpio12\"").unwrap(), PinConfig::inverted(12));
        assert_eq!(parse_pin("^!gpio7").unwrap(), PinConfig::switch(7));
        assert_eq!(parse_pin("!^gpio7").unwrap(), PinConfig::switch(7));
        assert_eq!(parse_pin("gpio30"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("pin7"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_mismatched_tables_rejected() {
        let input = r#"
[selector]
pins = ["^!gpio7", "^!gpio8"]
speeds = [100, 150, 200]
"#;
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::ChannelCountMismatch {
                speeds: 3,
                pins: 2
            }))
        );
    }

    #[test]
    fn test_single_table_checked_against_defaults() {
        // Six default pins, two speeds
        let input = "[selector]\nspeeds = [100, 200]\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::ChannelCountMismatch {
                speeds: 2,
                pins: 6
            }))
        );

        // Same length as the default pin table is fine
        let input = "[selector]\nspeeds = [10, 20, 30, 40, 50, 60.5]\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.selector.channels[5].speed_mm_s, 60.5);
        assert_eq!(config.selector.channels[5].pin, PinConfig::switch(12));
    }

    #[test]
    fn test_policy_and_initial_speed() {
        let input = r#"
[selector]
policy = "release"
initial_speed = 1500
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.selector.policy, SelectionPolicy::SelectOnRelease);
        assert_eq!(config.initial_speed_mm_s(), 1500.0);

        let config = parse_config("[selector]\ninitial_speed = \"max\"\n").unwrap();
        assert_eq!(config.selector.initial_speed_mm_s, None);

        assert_eq!(
            parse_config("[selector]\npolicy = \"sometimes\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[heater]\nmax_temp = 55\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[motion]\njerk = 5\nmax_speed = 400\n").unwrap();
        assert_eq!(config.limits.max_speed_mm_s, 400.0);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[mechanics]\nmicrosteps = lots\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[selector]\nspeeds = 100, 200\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[selector]\nmax_count = 0\n"),
            Err(ParseError::Config(ConfigError::ZeroMaxCount))
        );
        assert_eq!(
            parse_config("version = 3\n"),
            Err(ParseError::Config(ConfigError::UnsupportedVersion(3)))
        );
    }

    #[test]
    fn test_too_many_pins() {
        let input = concat!(
            "[selector]\n",
            "pins = [\"gpio0\", \"gpio1\", \"gpio2\", \"gpio3\", \"gpio4\", ",
            "\"gpio5\", \"gpio6\", \"gpio7\", \"gpio8\"]\n",
        );
        assert_eq!(parse_config(input), Err(ParseError::TooManyItems));
    }

    #[test]
    fn test_trailing_comma_and_header_comment() {
        let input = "[selector] # inputs\npins = [\"^!gpio2\", \"^!gpio3\",]\nspeeds = [5, 6,]\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.selector.channel_count(), 2);
        assert_eq!(config.selector.channels[1].pin, PinConfig::switch(3));
    }
}
