//! Serial command channel toward the servo controller
//!
//! One writer task owns the port; every producer talks to it through a
//! clone-able [`CommandSender`], which keeps command lines atomic on
//! the wire and guarantees the port is released exactly once.

mod link;
mod protocol;

pub use link::{CommandSender, SerialError, SerialLink};
pub use protocol::Command;
