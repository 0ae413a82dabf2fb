//! Stdin control listener
//!
//! Runs on a dedicated blocking thread so stdin reads never touch the
//! async frame loop; parsed commands are forwarded over an mpsc
//! channel. Unknown input is logged and ignored.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::mode::Mode;

/// Discrete user commands toward the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Switch the mapping discipline.
    SelectMode(Mode),
    /// Terminate the frame loop.
    Quit,
}

impl ControlCommand {
    /// Parse one input line; `None` for anything unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "h" | "hand" | "gesture" => Some(Self::SelectMode(Mode::Gesture)),
            "a" | "audio" => Some(Self::SelectMode(Mode::Audio)),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Errors that can occur in the input listener
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input listener is already running")]
    AlreadyRunning,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}

/// Reads control commands from stdin and forwards them to the loop.
pub struct InputListener {
    command_tx: mpsc::Sender<ControlCommand>,
    running: Arc<AtomicBool>,
}

impl InputListener {
    pub fn new(command_tx: mpsc::Sender<ControlCommand>) -> Self {
        Self {
            command_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the listener thread. It runs until stdin closes, the
    /// command channel closes, or a quit command has been forwarded.
    pub fn start(&self) -> Result<(), InputError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(InputError::AlreadyRunning);
        }

        let command_tx = self.command_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("input-listener".to_string())
            .spawn(move || {
                info!("input listener thread started");
                read_loop(command_tx, &running);
                running.store(false, Ordering::SeqCst);
                info!("input listener thread stopped");
            })
            .map_err(|e| InputError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    /// Ask the thread to stop after its current read.
    ///
    /// A blocked stdin read only notices on the next line; that is
    /// fine, the thread holds no resources that outlive the process.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn read_loop(command_tx: mpsc::Sender<ControlCommand>, running: &AtomicBool) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };

        match ControlCommand::parse(&line) {
            Some(command) => {
                debug!(?command, "control command");
                if command_tx.blocking_send(command).is_err() {
                    warn!("control channel closed, stopping listener");
                    break;
                }
                if command == ControlCommand::Quit {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => {
                warn!(input = %line.trim(), "unrecognized control input (h/a/q)");
            }
        }
    }
}
