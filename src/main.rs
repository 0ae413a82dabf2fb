//! servo-hand-daemon: gesture/audio servo control over serial
//!
//! Translates a live perceptual signal into position commands for five
//! servo channels (one per finger) on a microcontroller behind a
//! serial link:
//! - Gesture mode: a rising finger edge triggers a 0..=180 sweep on
//!   that finger's channel; no hand resets every channel to 90.
//! - Audio mode: ambient loudness drives all five channels directly.
//!
//! Mode switching and quit arrive as control commands on stdin
//! (h / a / q). Camera and microphone capture are external; the binary
//! runs against simulated sensor sources by default.

mod channels;
mod config;
mod events;
mod input;
mod lifecycle;
mod mapper;
mod mode;
mod orchestrator;
mod sensor;
mod serial;
mod sweep;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::channels::ChannelTracker;
use crate::config::Config;
use crate::events::StateEvent;
use crate::input::{ControlCommand, InputListener};
use crate::lifecycle::ShutdownSignal;
use crate::mode::{Mode, ModeArbiter};
use crate::orchestrator::Orchestrator;
use crate::sensor::{sim, AudioSampler};
use crate::serial::SerialLink;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "servo-hand-daemon starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(
        port = %config.serial_port,
        baud = config.baud_rate,
        "configuration loaded"
    );

    // The daemon is useless without an actuator link: open it first and
    // fail hard if it is not there
    let (link, commands) = SerialLink::open(&config.serial_port, config.baud_rate)
        .context("cannot open the servo controller link")?;

    // Channels for inter-component communication
    // Input listener / shutdown -> frame loop
    let (control_tx, control_rx) = mpsc::channel::<ControlCommand>(32);
    // Frame loop -> observability consumers
    let (event_tx, mut event_rx) = broadcast::channel::<StateEvent>(64);

    // Start the stdin control listener (runs on a dedicated thread)
    let input_listener = InputListener::new(control_tx.clone());
    match input_listener.start() {
        Ok(()) => info!("input listener started"),
        Err(e) => {
            error!(?e, "failed to start input listener");
            warn!("continuing without stdin control, stop with SIGTERM/ctrl-c");
        }
    }

    // Start the background audio sampler
    let (sampler, energy_rx) =
        AudioSampler::spawn(sim::PulseEnergy::default(), config.audio_poll_interval);

    // Forward shutdown signals as a quit command so the frame loop can
    // let in-flight sweeps finish before the port goes away
    let shutdown_tx = control_tx.clone();
    tokio::spawn(async move {
        ShutdownSignal::new().wait().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(ControlCommand::Quit).await;
    });

    // Log the observability event stream
    tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => info!(%event, "state event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "state event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let orchestrator = Orchestrator::new(
        ModeArbiter::new(Mode::Gesture),
        ChannelTracker::new(),
        commands.clone(),
        energy_rx,
        event_tx,
        config,
    );

    info!("daemon initialized, entering frame loop");
    orchestrator.run(sim::ScriptedFrames::default(), control_rx).await;

    // Teardown order matters: stop every command producer before
    // releasing the serial port, so no write can race the close
    info!("shutting down...");
    input_listener.stop();
    sampler.stop().await;
    drop(control_tx);
    drop(commands);
    link.closed().await;

    info!("servo-hand-daemon stopped");
    Ok(())
}
