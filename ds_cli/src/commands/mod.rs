//! Command implementations for the debsweep CLI.
//!
//! Each submodule handles a specific command or group of related commands.

pub mod keep;
pub mod orphans;
