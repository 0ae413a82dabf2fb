//! Input-to-channel mapping
//!
//! Two mutually exclusive disciplines: gesture mapping turns a hand
//! landmark set into a per-channel raised vector, audio mapping turns
//! an energy estimate into one angle for all channels. Both are pure
//! functions; any persistence lives in the channel tracker.

pub mod audio;
pub mod gesture;
