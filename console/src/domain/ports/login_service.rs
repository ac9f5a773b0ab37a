//! Driven port for exchanging login credentials for a session token.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Credential, LoginCredentials};

define_port_error! {
    /// Errors surfaced by the login endpoint.
    pub enum LoginServiceError {
        /// The server refused the credentials.
        Rejected { message: String } =>
            "login rejected: {message}",
        /// Transport failed before a response arrived.
        Network { message: String } =>
            "login endpoint unreachable: {message}",
        /// Any other non-success status or unreadable body.
        Server { message: String } =>
            "login failed: {message}",
    }
}

/// Port for authenticating the operator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Exchange credentials for an opaque token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Credential, LoginServiceError>;
}
