//! The line-oriented command protocol spoken over the host socket.
//!
//! Watchers and one-shot clients write one command per newline-terminated
//! line. A line is a verb followed by whitespace-separated arguments; the
//! host parses each line into a [`Command`] before applying it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{Rect, WindowHandle};

/// Longest accepted command line, in bytes, excluding the newline.
pub const MAX_LINE_LENGTH: usize = 255;

/// One raw protocol line, split into a verb and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMessage {
    pub verb: String,
    pub args: Vec<String>,
}

impl ControlMessage {
    /// Splits a line on runs of whitespace. Blank lines carry no message.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_owned);
        let verb = tokens.next()?;
        Some(Self {
            verb,
            args: tokens.collect(),
        })
    }
}

/// Joins client invocation arguments into one command line.
///
/// A single argument passes through verbatim. Multiple arguments are each
/// followed by one space, trailing delimiter included, so the host's
/// whitespace split recovers the original tokens.
#[must_use]
pub fn join_line(args: &[String]) -> String {
    match args {
        [only] => only.clone(),
        _ => {
            let mut line = String::new();
            for arg in args {
                line.push_str(arg);
                line.push(' ');
            }
            line
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unrecognised command: {0}")]
    UnknownVerb(String),
    #[error("missing argument {0}")]
    MissingArgument(&'static str),
    #[error("bad argument {name}: {value}")]
    BadArgument { name: &'static str, value: String },
    #[error("empty command line")]
    EmptyLine,
}

/// A parsed command, ready to apply to the host state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a window, absolutely or relative to where it is.
    MoveWindow {
        window: WindowHandle,
        relative: bool,
        x: i32,
        y: i32,
    },
    /// Set a window's size.
    ResizeWindow {
        window: WindowHandle,
        width: u32,
        height: u32,
    },
    /// A watcher reported a new window and its geometry.
    WindowCreated { window: WindowHandle, rect: Rect },
    /// The pointer entered a window.
    WindowEntered { window: WindowHandle },
    /// A window is gone from the window system.
    WindowDestroyed { window: WindowHandle },
    /// A window-system event with no dedicated verb; carries the raw event
    /// code so nothing a watcher sees is silently dropped.
    Unhandled { code: u8 },
}

impl TryFrom<&ControlMessage> for Command {
    type Error = ParseCommandError;

    fn try_from(message: &ControlMessage) -> Result<Self, Self::Error> {
        let args = message.args.as_slice();
        match message.verb.as_str() {
            "move" => build_move(args),
            "size" => build_size(args),
            "window-created" => build_window_created(args),
            "window-entered" => build_window_entered(args),
            "window-destroyed" => build_window_destroyed(args),
            "event" => build_event(args),
            _ => Err(ParseCommandError::UnknownVerb(message.verb.clone())),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let message = ControlMessage::parse(line).ok_or(ParseCommandError::EmptyLine)?;
        Self::try_from(&message)
    }
}

impl fmt::Display for Command {
    /// Formats the exact wire line for this command, newline excluded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveWindow {
                window,
                relative,
                x,
                y,
            } => {
                if *relative {
                    write!(f, "move {window} rel {x} {y}")
                } else {
                    write!(f, "move {window} {x} {y}")
                }
            }
            Self::ResizeWindow {
                window,
                width,
                height,
            } => write!(f, "size {window} {width} {height}"),
            Self::WindowCreated { window, rect } => write!(
                f,
                "window-created {window} {} {} {} {}",
                rect.x, rect.y, rect.w, rect.h
            ),
            Self::WindowEntered { window } => write!(f, "window-entered {window}"),
            Self::WindowDestroyed { window } => write!(f, "window-destroyed {window}"),
            Self::Unhandled { code } => write!(f, "event {code}"),
        }
    }
}

fn build_move(args: &[String]) -> Result<Command, ParseCommandError> {
    let (window, flag, x, y) = match args {
        [window, x, y] => (window, None, x, y),
        [window, flag, x, y] => (window, Some(flag.as_str()), x, y),
        _ => return Err(ParseCommandError::MissingArgument("window x y")),
    };
    let relative = match flag {
        None | Some("abs") => false,
        Some("rel") => true,
        Some(other) => {
            return Err(ParseCommandError::BadArgument {
                name: "placement",
                value: other.to_string(),
            })
        }
    };
    Ok(Command::MoveWindow {
        window: parse_arg("window", window)?,
        relative,
        x: parse_arg("x", x)?,
        y: parse_arg("y", y)?,
    })
}

fn build_size(args: &[String]) -> Result<Command, ParseCommandError> {
    let [window, width, height] = args else {
        return Err(ParseCommandError::MissingArgument("window width height"));
    };
    Ok(Command::ResizeWindow {
        window: parse_arg("window", window)?,
        width: parse_arg("width", width)?,
        height: parse_arg("height", height)?,
    })
}

fn build_window_created(args: &[String]) -> Result<Command, ParseCommandError> {
    let [window, x, y, w, h] = args else {
        return Err(ParseCommandError::MissingArgument("window x y w h"));
    };
    Ok(Command::WindowCreated {
        window: parse_arg("window", window)?,
        rect: Rect::new(
            parse_arg("x", x)?,
            parse_arg("y", y)?,
            parse_arg("w", w)?,
            parse_arg("h", h)?,
        ),
    })
}

fn build_window_entered(args: &[String]) -> Result<Command, ParseCommandError> {
    let [window] = args else {
        return Err(ParseCommandError::MissingArgument("window"));
    };
    Ok(Command::WindowEntered {
        window: parse_arg("window", window)?,
    })
}

fn build_window_destroyed(args: &[String]) -> Result<Command, ParseCommandError> {
    let [window] = args else {
        return Err(ParseCommandError::MissingArgument("window"));
    };
    Ok(Command::WindowDestroyed {
        window: parse_arg("window", window)?,
    })
}

fn build_event(args: &[String]) -> Result<Command, ParseCommandError> {
    let [code] = args else {
        return Err(ParseCommandError::MissingArgument("code"));
    };
    Ok(Command::Unhandled {
        code: parse_arg("code", code)?,
    })
}

fn parse_arg<T: FromStr>(name: &'static str, value: &str) -> Result<T, ParseCommandError> {
    value.parse().map_err(|_| ParseCommandError::BadArgument {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_move_defaults_to_absolute() {
        assert_eq!(
            "move 1 10 20".parse(),
            Ok(Command::MoveWindow {
                window: WindowHandle(1),
                relative: false,
                x: 10,
                y: 20,
            })
        );
    }

    #[test]
    fn parse_move_with_placement_flag() {
        assert_eq!(
            "move 1 rel -4 6".parse(),
            Ok(Command::MoveWindow {
                window: WindowHandle(1),
                relative: true,
                x: -4,
                y: 6,
            })
        );
        assert_eq!(
            "move 1 abs 0 0".parse(),
            Ok(Command::MoveWindow {
                window: WindowHandle(1),
                relative: false,
                x: 0,
                y: 0,
            })
        );
    }

    #[test]
    fn parse_move_rejects_bad_placement() {
        assert_eq!(
            "move 1 sideways 4 6".parse::<Command>(),
            Err(ParseCommandError::BadArgument {
                name: "placement",
                value: "sideways".to_string(),
            })
        );
    }

    #[test]
    fn parse_window_accepts_hex() {
        assert_eq!(
            "window-entered 0x2a".parse(),
            Ok(Command::WindowEntered {
                window: WindowHandle(42),
            })
        );
    }

    #[test]
    fn parse_size() {
        assert_eq!(
            "size 7 300 200".parse(),
            Ok(Command::ResizeWindow {
                window: WindowHandle(7),
                width: 300,
                height: 200,
            })
        );
    }

    #[test]
    fn parse_size_rejects_negative_extent() {
        assert!("size 7 -300 200".parse::<Command>().is_err());
    }

    #[test]
    fn parse_watcher_notifications() {
        assert_eq!(
            "window-created 9 0 0 640 480".parse(),
            Ok(Command::WindowCreated {
                window: WindowHandle(9),
                rect: Rect::new(0, 0, 640, 480),
            })
        );
        assert_eq!(
            "window-destroyed 9".parse(),
            Ok(Command::WindowDestroyed {
                window: WindowHandle(9),
            })
        );
        assert_eq!("event 4".parse(), Ok(Command::Unhandled { code: 4 }));
    }

    #[test]
    fn parse_unknown_verb() {
        assert_eq!(
            "frobnicate 1".parse::<Command>(),
            Err(ParseCommandError::UnknownVerb("frobnicate".to_string()))
        );
    }

    #[test]
    fn blank_line_is_no_message() {
        assert_eq!(ControlMessage::parse("   \t "), None);
        assert_eq!(ControlMessage::parse(""), None);
    }

    #[test]
    fn build_move_without_parameter() {
        assert!(build_move(&[]).is_err());
    }

    #[test]
    fn build_size_without_parameter() {
        assert!(build_size(&["1".to_string()]).is_err());
    }

    #[test]
    fn build_window_created_without_geometry() {
        assert!(build_window_created(&["9".to_string()]).is_err());
    }

    #[test]
    fn join_single_argument_is_verbatim() {
        assert_eq!(join_line(&["move 1 10 20".to_string()]), "move 1 10 20");
    }

    #[test]
    fn join_keeps_trailing_delimiter() {
        let args: Vec<String> = ["move", "1", "10", "20"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(join_line(&args), "move 1 10 20 ");
    }

    #[test]
    fn host_split_recovers_joined_tokens() {
        let args: Vec<String> = ["move", "1", "10", "20"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let message = ControlMessage::parse(&join_line(&args)).unwrap();
        assert_eq!(message.verb, "move");
        assert_eq!(message.args, vec!["1", "10", "20"]);
    }

    #[test]
    fn display_round_trips() {
        let commands = [
            Command::MoveWindow {
                window: WindowHandle(3),
                relative: true,
                x: -2,
                y: 8,
            },
            Command::ResizeWindow {
                window: WindowHandle(3),
                width: 800,
                height: 600,
            },
            Command::WindowCreated {
                window: WindowHandle(0xbeef),
                rect: Rect::new(10, 20, 300, 400),
            },
            Command::Unhandled { code: 33 },
        ];
        for command in commands {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }
}
