//! Layout configuration loaded once at host startup.
//!
//! The config file is a plain `key value` format, one override per line.
//! Every field has a compiled-in default, so a missing file, a malformed
//! line, or an unknown key never stops the host from booting.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A packed 32-bit ARGB border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl FromStr for Color {
    type Err = std::num::ParseIntError;

    /// Parses hexadecimal, with or without a leading `0x`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        u32::from_str_radix(hex, 16).map(Self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// The host's layout parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default x offset for newly placed windows.
    pub x: u32,
    /// Default y offset for newly placed windows.
    pub y: u32,
    /// Gap between tiled windows, in pixels.
    pub gap: u32,
    /// Screen margin kept free above the tiling area.
    pub top: u32,
    /// Screen margin kept free below the tiling area.
    pub bottom: u32,
    /// Screen margin kept free left of the tiling area.
    pub left: u32,
    /// Screen margin kept free right of the tiling area.
    pub right: u32,
    /// Window border width, in pixels.
    pub border_width: u32,
    /// Border color of the focused window.
    pub focused: Color,
    /// Border color of unfocused windows.
    pub unfocused: Color,
    /// Border color of windows demanding attention.
    pub urgent: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x: 6,
            y: 5,
            gap: 8,
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
            border_width: 2,
            focused: Color(0xff00_ccff),
            unfocused: Color(0xff80_8080),
            urgent: Color(0xffcc_0000),
        }
    }
}

impl Config {
    /// Loads the config file on top of the defaults.
    ///
    /// An unreadable file is logged and ignored, leaving every field at its
    /// default.
    #[must_use]
    pub fn from_file(path: &Path) -> Self {
        tracing::info!("Parsing config: {}", path.display());
        let mut config = Self::default();
        match fs::read_to_string(path) {
            Ok(contents) => config.apply(&contents),
            Err(err) => tracing::warn!("Could not open file: {}: {}", path.display(), err),
        }
        config
    }

    /// Applies `key value` override lines to the current values.
    ///
    /// Overrides are field-local: a line that fails to parse leaves only its
    /// own field untouched. Keys that are not recognized are skipped.
    fn apply(&mut self, contents: &str) {
        for line in contents.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            match key {
                "x" => assign_count(key, value, &mut self.x),
                "y" => assign_count(key, value, &mut self.y),
                "gap" => assign_count(key, value, &mut self.gap),
                "top" => assign_count(key, value, &mut self.top),
                "bottom" => assign_count(key, value, &mut self.bottom),
                "left" => assign_count(key, value, &mut self.left),
                "right" => assign_count(key, value, &mut self.right),
                "bw" => assign_count(key, value, &mut self.border_width),
                "cf" => assign_color(key, value, &mut self.focused),
                "cu" => assign_color(key, value, &mut self.unfocused),
                "ci" => assign_color(key, value, &mut self.urgent),
                _ => {}
            }
        }
    }
}

/// Assigns a decimal count, clamping negative values to zero.
fn assign_count(key: &str, value: &str, field: &mut u32) {
    match value.parse::<i64>() {
        Ok(count) => *field = u32::try_from(count.max(0)).unwrap_or(u32::MAX),
        Err(err) => tracing::warn!("Could not read {}: {}", key, err),
    }
}

fn assign_color(key: &str, value: &str, field: &mut Color) {
    match value.parse::<Color>() {
        Ok(color) => *field = color,
        Err(err) => tracing::warn!("Could not read {}: {}", key, err),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn applied(contents: &str) -> Config {
        let mut config = Config::default();
        config.apply(contents);
        config
    }

    #[test]
    fn defaults_are_compiled_in() {
        let config = Config::default();
        assert_eq!(config.x, 6);
        assert_eq!(config.y, 5);
        assert_eq!(config.gap, 8);
        assert_eq!(config.top, 0);
        assert_eq!(config.bottom, 0);
        assert_eq!(config.left, 0);
        assert_eq!(config.right, 0);
        assert_eq!(config.border_width, 2);
        assert_eq!(config.focused, Color(0xff00_ccff));
        assert_eq!(config.unfocused, Color(0xff80_8080));
        assert_eq!(config.urgent, Color(0xffcc_0000));
    }

    #[test]
    fn overrides_are_field_local() {
        let config = applied("gap 12\nbw notanumber\n");
        assert_eq!(config.gap, 12);
        assert_eq!(config.border_width, Config::default().border_width);
        assert_eq!(config.x, Config::default().x);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let config = applied("x -5\n");
        assert_eq!(config.x, 0);
    }

    #[test]
    fn colors_parse_as_hex() {
        let config = applied("cf ff00ccff\ncu 0xdeadbeef\n");
        assert_eq!(config.focused, Color(0xff00_ccff));
        assert_eq!(config.unfocused, Color(0xdead_beef));
    }

    #[test]
    fn malformed_color_keeps_default() {
        let config = applied("ci xyzzy\n");
        assert_eq!(config.urgent, Config::default().urgent);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let config = applied("frobnicate 9\ngap 3\n");
        assert_eq!(config.gap, 3);
        assert_eq!(config.x, Config::default().x);
    }

    #[test]
    fn keys_split_on_any_whitespace() {
        let config = applied("top\t12\nbottom   4\n");
        assert_eq!(config.top, 12);
        assert_eq!(config.bottom, 4);
    }

    #[test]
    fn key_without_value_is_skipped() {
        let config = applied("gap\n\n");
        assert_eq!(config.gap, Config::default().gap);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file(Path::new("/nonexistent/tartwm.conf"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_overrides_load() {
        let mut file = tempfile::NamedTempFile::new().expect("Temp file created");
        writeln!(file, "x 4\ny 3\ngap 0").expect("Temp file written");
        let config = Config::from_file(file.path());
        assert_eq!(config.x, 4);
        assert_eq!(config.y, 3);
        assert_eq!(config.gap, 0);
        assert_eq!(config.border_width, Config::default().border_width);
    }

    #[test]
    fn color_displays_with_prefix() {
        assert_eq!(Color(0xff00_ccff).to_string(), "0xff00ccff");
    }
}
