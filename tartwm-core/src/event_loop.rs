use tokio::signal::unix::{signal, SignalKind};

use crate::errors::Result;
use crate::models::Manager;
use crate::utils::child_process::WatcherProcess;
use crate::utils::command_socket::CommandSocket;

impl Manager {
    /// Runs the host: binds the command socket, boots the watcher, then
    /// applies commands one at a time in the order they arrive until a
    /// termination signal comes in.
    ///
    /// # Errors
    ///
    /// Will error if the socket cannot be bound or the signal handlers
    /// cannot be installed.
    pub async fn event_loop(mut self) -> Result<()> {
        let socket_file = CommandSocket::socket_path()?;
        tracing::info!("Creating socket: {}", socket_file.display());
        let mut command_socket = CommandSocket::listen(socket_file).await?;

        // The host keeps serving clients without a watcher; windows just go
        // unreported until one is started by hand.
        match WatcherProcess::spawn() {
            Ok(watcher) => {
                tracing::info!("Started watcher: pid {}", watcher.id());
                self.watcher = Some(watcher);
            }
            Err(err) => tracing::error!("Failed to start the watcher: {}", err),
        }

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigchld = signal(SignalKind::child())?;

        tracing::info!("Running.");
        loop {
            tokio::select! {
                Some(command) = command_socket.read_command() => {
                    if self.command_handler(&command) {
                        tracing::debug!("state changed by command: {}", command);
                    }
                }
                _ = sigterm.recv() => {
                    tracing::info!("SIGTERM received, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    tracing::info!("SIGINT received, shutting down");
                    break;
                }
                _ = sigchld.recv() => {
                    if let Some(status) = self.watcher.as_mut().and_then(WatcherProcess::try_reap) {
                        tracing::warn!("Watcher exited: {}", status);
                        self.watcher = None;
                    }
                }
            }
        }

        command_socket.shutdown().await;
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
        }
        Ok(())
    }
}
