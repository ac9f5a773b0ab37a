//! HTTP outbound adapters.
//!
//! Thin reqwest implementations of the `UserDirectory` and `LoginService`
//! ports against a reqres-style REST API.

mod directory;
mod dto;
mod login;
mod transport;

pub use directory::HttpUserDirectory;
pub use login::HttpLoginService;
pub use transport::HttpEndpoint;
