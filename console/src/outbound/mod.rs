//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed directory and login clients
//! - **credentials**: cap-std file store for the session token
//! - **memory**: example-data backed directory for offline use
//!
//! Adapters are thin translators between domain types and transport or
//! storage representations. They contain no view-state logic.

pub mod credentials;
pub mod http;
pub mod memory;
