//! Command-line inbound adapter.
//!
//! Parses arguments with clap, routes each command through the session
//! gate's guard, and renders outcomes as text or JSON. Nothing here prints;
//! the binary owns stdout.

mod app;
mod args;
mod render;

pub use app::{Console, Outcome, PageSummary, build_console};
pub use args::{Cli, Command, EditArgs, LoginArgs, OutputFormat, UsersArgs};
pub use render::{render, render_error};
