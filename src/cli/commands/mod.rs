//! Subcommands of the `hexapawn` binary

pub mod train;
pub mod watch;
