//! Control input module
//!
//! Out-of-band user commands (mode selection, quit) arrive
//! asynchronously relative to the frame loop, read from stdin on a
//! dedicated thread.

mod listener;

pub use listener::{ControlCommand, InputError, InputListener};
