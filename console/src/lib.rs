//! View-state engine for a user directory admin console.
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`]: records, patches, the collection store with last-issued-wins
//!   page loads, the pure view projection, and the session gate.
//! - [`domain::ports`]: traits for the remote directory, the login endpoint,
//!   and durable credential storage.
//! - [`outbound`]: reqwest, cap-std and in-memory adapters for those ports.
//! - [`inbound`]: the clap command line driving the engine.
//! - [`config`]: `CONSOLE_*` settings loaded with OrthoConfig.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
