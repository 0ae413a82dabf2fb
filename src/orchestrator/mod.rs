//! Frame loop orchestration
//!
//! Once per frame tick: read the active mode, map the corresponding
//! sensor input, and either launch sweeps on rising finger edges
//! (gesture mode), reset all channels while no hand is visible, or
//! drive all channels directly from the audio level (audio mode).
//! Control commands are applied between ticks; quit lets in-flight
//! sweeps finish before the loop returns.

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::interval;
use tracing::{debug, info};

use crate::channels::{ChannelId, ChannelTracker};
use crate::config::Config;
use crate::events::StateEvent;
use crate::input::ControlCommand;
use crate::mapper::audio;
use crate::mapper::gesture::{self, GestureVector};
use crate::mode::{Mode, ModeArbiter};
use crate::sensor::{FrameSource, Landmark};
use crate::serial::{Command, CommandSender};
use crate::sweep;

pub struct Orchestrator {
    mode: ModeArbiter,
    tracker: ChannelTracker,
    commands: CommandSender,
    energy_rx: watch::Receiver<f32>,
    event_tx: broadcast::Sender<StateEvent>,
    sweeps: JoinSet<()>,
    config: Config,
    hand_visible: bool,
}

impl Orchestrator {
    pub fn new(
        mode: ModeArbiter,
        tracker: ChannelTracker,
        commands: CommandSender,
        energy_rx: watch::Receiver<f32>,
        event_tx: broadcast::Sender<StateEvent>,
        config: Config,
    ) -> Self {
        Self {
            mode,
            tracker,
            commands,
            energy_rx,
            event_tx,
            sweeps: JoinSet::new(),
            config,
            hand_visible: false,
        }
    }

    /// Run until a quit command arrives or the control channel closes.
    pub async fn run<F: FrameSource>(
        mut self,
        mut frames: F,
        mut control_rx: mpsc::Receiver<ControlCommand>,
    ) {
        let mut ticker = interval(self.config.frame_interval);
        info!(mode = %self.mode.get(), "frame loop started");

        loop {
            tokio::select! {
                command = control_rx.recv() => {
                    match command {
                        Some(ControlCommand::SelectMode(mode)) => self.switch_mode(mode),
                        Some(ControlCommand::Quit) | None => break,
                    }
                }
                _ = ticker.tick() => {
                    self.tick(&mut frames).await;
                }
            }
        }

        info!("frame loop stopping, letting in-flight sweeps finish");
        self.drain_sweeps().await;
        info!("frame loop stopped");
    }

    async fn tick(&mut self, frames: &mut impl FrameSource) {
        // Reap finished sweep tasks so the set cannot grow over a long
        // run; only unfinished sweeps stay tracked for shutdown
        while self.sweeps.try_join_next().is_some() {}

        match self.mode.get() {
            Mode::Gesture => self.gesture_tick(frames.next_frame().as_deref()).await,
            Mode::Audio => self.audio_tick().await,
        }
    }

    async fn gesture_tick(&mut self, landmarks: Option<&[Landmark]>) {
        match gesture::map(landmarks) {
            Some(vector) => {
                if !self.hand_visible {
                    self.hand_visible = true;
                    self.emit(StateEvent::HandDetected);
                }
                for channel in ChannelId::ALL {
                    let raised = vector[channel.index()];
                    let (_, claim) = self.tracker.update(channel, raised);
                    if let Some(claim) = claim {
                        self.emit(StateEvent::SweepStarted { channel });
                        self.sweeps.spawn(sweep::run(
                            claim,
                            self.commands.clone(),
                            self.config.step_delay,
                        ));
                    }
                }
                debug!(mode = "gesture", status = %gesture_status(&vector));
            }
            None => {
                if self.hand_visible {
                    self.hand_visible = false;
                    self.emit(StateEvent::HandLost);
                }
                // Direct reset, bypassing tracker and sweeps, every
                // frame until the hand reappears
                for channel in ChannelId::ALL {
                    self.commands
                        .send(Command::new(channel, self.config.reset_angle))
                        .await;
                }
                debug!(mode = "gesture", status = "no hand, resetting");
            }
        }
    }

    async fn audio_tick(&mut self) {
        let energy = *self.energy_rx.borrow();
        let angle = audio::map(energy);
        for channel in ChannelId::ALL {
            self.commands.send(Command::new(channel, angle)).await;
        }
        debug!(mode = "audio", energy, angle, "audio drive");
    }

    fn switch_mode(&mut self, mode: Mode) {
        if self.mode.get() == mode {
            return;
        }
        self.mode.set(mode);
        info!(%mode, "mode switched");
        self.emit(StateEvent::ModeChanged { mode });
    }

    fn emit(&self, event: StateEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    async fn drain_sweeps(&mut self) {
        while self.sweeps.join_next().await.is_some() {}
    }
}

fn gesture_status(vector: &GestureVector) -> String {
    let parts: Vec<String> = ChannelId::ALL
        .iter()
        .map(|c| {
            let state = if vector[c.index()] { "Up" } else { "Down" };
            format!("{c}:{state}")
        })
        .collect();
    parts.join(" ")
}
