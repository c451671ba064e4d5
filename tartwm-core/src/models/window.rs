//! Window information kept by the host.
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::models::Rect;

/// An opaque identifier a watcher assigned to a window.
///
/// The host never interprets the value; it only keys state by it. On the
/// wire it is written in decimal, and parsed from decimal or `0x` hex so ids
/// can be pasted straight out of window-system tooling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

impl FromStr for WindowHandle {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let id = match value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16)?,
            None => value.parse()?,
        };
        Ok(Self(id))
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A window the host is tracking, with its last known geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub handle: WindowHandle,
    pub rect: Rect,
}

impl Window {
    #[must_use]
    pub const fn new(handle: WindowHandle, rect: Rect) -> Self {
        Self { handle, rect }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handle_parses_decimal_and_hex() {
        assert_eq!("42".parse(), Ok(WindowHandle(42)));
        assert_eq!("0x2a".parse(), Ok(WindowHandle(42)));
        assert_eq!("0X2A".parse(), Ok(WindowHandle(42)));
    }

    #[test]
    fn handle_rejects_garbage() {
        assert!("banana".parse::<WindowHandle>().is_err());
        assert!("0x".parse::<WindowHandle>().is_err());
        assert!("-3".parse::<WindowHandle>().is_err());
    }

    #[test]
    fn handle_displays_in_decimal() {
        assert_eq!(WindowHandle(0x2a).to_string(), "42");
    }
}
