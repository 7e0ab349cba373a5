//! Discord gateway surface: event handlers, prefix commands and replies.

pub mod command;
pub mod handler;
pub mod log;
pub mod permission;
pub mod reply;
pub mod start;
