//! Creates the Unix socket listening for watcher and client commands.
use std::env;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use crate::command::{Command, ControlMessage, MAX_LINE_LENGTH};
use crate::errors::{Result, TartError};

/// Holds the socket file location and a receiver of parsed commands.
///
/// Every accepted peer gets its own reader task; the lines of all peers
/// funnel into one queue, so [`CommandSocket::read_command`] yields commands
/// in arrival order no matter who sent them. A peer that sends nothing costs
/// nothing and never delays the others.
#[derive(Debug)]
pub struct CommandSocket {
    socket_file: PathBuf,
    rx: mpsc::UnboundedReceiver<Command>,
    listener: Option<tokio::task::JoinHandle<()>>,
}

impl Drop for CommandSocket {
    fn drop(&mut self) {
        assert!(
            std::thread::panicking() || self.listener.is_none(),
            "CommandSocket has to be shutdown explicitly before drop"
        );
    }
}

impl CommandSocket {
    /// Bind to the Unix socket and start accepting peers.
    ///
    /// # Errors
    ///
    /// Will error if the socket cannot be bound, likely a filesystem issue
    /// such as inadequate permissions.
    pub async fn listen(socket_file: PathBuf) -> Result<Self> {
        let listener = build_listener(&socket_file).await?;
        let (tx, rx) = mpsc::unbounded_channel();
        let accepter = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((peer, _)) => {
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            service_peer(peer, &tx).await;
                        });
                    }
                    Err(e) => tracing::error!("Accept failed = {:?}", e),
                }
            }
        });
        Ok(Self {
            socket_file,
            rx,
            listener: Some(accepter),
        })
    }

    /// The next command from any connected peer.
    pub async fn read_command(&mut self) -> Option<Command> {
        self.rx.recv().await
    }

    /// Explicitly shutdown `CommandSocket` to perform cleanup.
    pub async fn shutdown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            listener.await.ok();
            fs::remove_file(self.socket_file.as_path()).await.ok();
        }
    }

    /// Derive the per-display socket path.
    ///
    /// The file lives in the user's runtime directory when one can be set
    /// up, and falls back to `/tmp` otherwise. The display identifier keys
    /// the file name so each display gets its own host.
    ///
    /// # Errors
    ///
    /// Will error if `DISPLAY` is not set.
    pub fn socket_path() -> Result<PathBuf> {
        let display = env::var("DISPLAY").map_err(|_| TartError::DisplayNotSet)?;
        let display = display.strip_prefix(':').unwrap_or(&display).to_owned();
        let placed = xdg::BaseDirectories::with_prefix("tartwm")
            .ok()
            .and_then(|base| {
                base.place_runtime_file(format!("display-{display}.sock"))
                    .ok()
            });
        Ok(match placed {
            Some(socket_file) => socket_file,
            None => PathBuf::from(format!("/tmp/tartwm-{display}.sock")),
        })
    }
}

async fn build_listener(socket_file: &Path) -> Result<UnixListener> {
    // A leftover socket file from a previous host would make the bind fail,
    // so clear it out of the way first.
    let listener = if let Ok(m) = UnixListener::bind(socket_file) {
        m
    } else {
        fs::remove_file(socket_file).await?;
        UnixListener::bind(socket_file)?
    };
    Ok(listener)
}

/// Reads one peer's lines until it disconnects. Lines that do not parse are
/// logged and skipped; they never end the peer or reach the queue.
async fn service_peer(peer: UnixStream, tx: &mpsc::UnboundedSender<Command>) {
    let mut reader = BufReader::new(peer);
    loop {
        match next_line(&mut reader).await {
            Ok(Some(Line::Full(line))) => {
                let Some(message) = ControlMessage::parse(&line) else {
                    continue;
                };
                match Command::try_from(&message) {
                    Ok(command) => {
                        if tx.send(command).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        tracing::error!("An error occurred while parsing the command: {}", err);
                    }
                }
            }
            Ok(Some(Line::Oversized)) => {
                tracing::error!("dropping command line over {} bytes", MAX_LINE_LENGTH);
            }
            Ok(Some(Line::NotText)) => {
                tracing::error!("dropping command line that is not UTF-8");
            }
            Ok(None) => return,
            Err(err) => {
                tracing::error!("Command read failed = {:?}", err);
                return;
            }
        }
    }
}

/// One framed line off the wire.
enum Line {
    Full(String),
    /// Longer than [`MAX_LINE_LENGTH`]; consumed through its newline.
    Oversized,
    /// Not valid UTF-8.
    NotText,
}

/// Reads one newline-terminated line of at most [`MAX_LINE_LENGTH`] bytes.
///
/// Returns `Ok(None)` once the peer has disconnected. A final line without a
/// newline is still delivered. An over-long line is consumed up to its
/// newline and reported as [`Line::Oversized`], leaving the stream aligned
/// on the next line rather than delivering a truncated command.
async fn next_line<R>(reader: &mut R) -> std::io::Result<Option<Line>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut discarding = false;
    loop {
        let consumed;
        let mut terminated = false;
        {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                if discarding {
                    return Ok(Some(Line::Oversized));
                }
                if line.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(into_text(line)));
            }
            if let Some(newline) = available.iter().position(|&b| b == b'\n') {
                if !discarding {
                    line.extend_from_slice(&available[..newline]);
                }
                consumed = newline + 1;
                terminated = true;
            } else {
                if !discarding {
                    line.extend_from_slice(available);
                }
                consumed = available.len();
            }
        }
        reader.consume(consumed);
        if terminated {
            if discarding || line.len() > MAX_LINE_LENGTH {
                return Ok(Some(Line::Oversized));
            }
            return Ok(Some(into_text(line)));
        }
        if line.len() > MAX_LINE_LENGTH {
            line.clear();
            discarding = true;
        }
    }
}

fn into_text(line: Vec<u8>) -> Line {
    String::from_utf8(line).map_or(Line::NotText, Line::Full)
}
