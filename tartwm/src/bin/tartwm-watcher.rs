//! Bridges X11 events into TartWM commands.
//!
//! Started by the host. Connects to the X server and to the host's command
//! socket, reports the windows that already exist, then forwards translated
//! events until either side goes away.

use anyhow::{Context, Result};

use tartwm::utils::log::setup_logging;
use tartwm_core::CommandSocket;
use x11rb_watcher::{Error, Watcher};

fn main() -> Result<()> {
    setup_logging();
    tracing::info!("tartwm-watcher booting...");

    let socket_file = CommandSocket::socket_path()?;
    let mut watcher = match Watcher::connect(&socket_file) {
        Ok(watcher) => watcher,
        Err(Error::Io(err)) => {
            return Err(err).with_context(|| {
                format!("Is TartWM running? (no host at {})", socket_file.display())
            });
        }
        Err(err) => return Err(err).context("Couldn't reach the X server"),
    };

    watcher.run().context("Watcher stopped unexpectedly")?;

    tracing::info!("Completed");
    Ok(())
}
