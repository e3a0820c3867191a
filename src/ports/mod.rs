//! Port traits: the seams between the dispatcher and the outside world.

pub mod config_port;
pub mod process_port;
