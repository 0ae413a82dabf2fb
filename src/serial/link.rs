//! Serial link ownership and the shared command sender
//!
//! Opening the port is fatal on failure (the daemon is useless without
//! an actuator link); individual write failures mid-run are logged and
//! dropped. The writer task exits, and thereby closes the port, only
//! after every [`CommandSender`] clone has been dropped.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, warn};

use super::Command;

/// Commands queued toward the writer before senders start waiting.
pub const COMMAND_QUEUE_DEPTH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },
}

/// Clone-able handle used by the frame loop and sweep tasks to emit
/// commands. Each command is written as one atomic line.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Command>,
}

impl CommandSender {
    /// Create a sender/receiver pair without a writer task attached.
    ///
    /// Used internally by [`SerialLink`] and by tests that want to
    /// observe commands directly.
    pub fn channel(depth: usize) -> (Self, mpsc::Receiver<Command>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx }, rx)
    }

    /// Queue one command. Transmission is fire-and-forget: if the
    /// writer is gone the command is logged and dropped, never an
    /// error for the caller.
    pub async fn send(&self, command: Command) {
        if self.tx.send(command).await.is_err() {
            warn!(%command, "serial writer gone, command dropped");
        }
    }
}

/// Owns the writer task for the serial port.
pub struct SerialLink {
    handle: JoinHandle<()>,
}

impl SerialLink {
    /// Open the port and spawn the writer. Failure here is a hard
    /// startup error.
    pub fn open(path: &str, baud: u32) -> Result<(Self, CommandSender), SerialError> {
        let port = tokio_serial::new(path, baud)
            .open_native_async()
            .map_err(|source| SerialError::Open {
                path: path.to_string(),
                source,
            })?;
        debug!(%path, baud, "serial port opened");
        Ok(Self::with_writer(port))
    }

    /// Spawn the writer task over any byte sink. Lets tests run the
    /// full write path against an in-memory stream.
    pub fn with_writer<W>(writer: W) -> (Self, CommandSender)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (sender, rx) = CommandSender::channel(COMMAND_QUEUE_DEPTH);
        let handle = tokio::spawn(write_loop(writer, rx));
        (Self { handle }, sender)
    }

    /// Wait for the writer to drain and release the port. Returns once
    /// every sender clone has been dropped and pending lines are out.
    pub async fn closed(self) {
        let _ = self.handle.await;
    }
}

async fn write_loop<W: AsyncWrite + Unpin>(mut writer: W, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        let line = command.encode();
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            // Non-fatal: the affected channel may end up visually stuck
            warn!(%command, error = %e, "serial write failed");
        }
    }
    let _ = writer.shutdown().await;
    debug!("serial writer stopped, port released");
}
