//! Configuration loading and management

use std::time::Duration;

use anyhow::{Context, Result};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Serial device the servo controller is attached to
    pub serial_port: String,

    /// Serial link baud rate
    pub baud_rate: u32,

    /// Frame loop cadence
    pub frame_interval: Duration,

    /// Delay between sweep ramp steps
    pub step_delay: Duration,

    /// Audio sampler polling period
    pub audio_poll_interval: Duration,

    /// Angle every channel is reset to when no hand is visible
    pub reset_angle: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            frame_interval: Duration::from_millis(33),
            step_delay: Duration::from_millis(20),
            audio_poll_interval: Duration::from_millis(10),
            reset_angle: 90,
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("SERVO_SERIAL_PORT") {
            config.serial_port = port;
        }
        if let Ok(baud) = std::env::var("SERVO_SERIAL_BAUD") {
            config.baud_rate = baud
                .parse()
                .context("SERVO_SERIAL_BAUD must be an integer baud rate")?;
        }

        Ok(config)
    }
}
