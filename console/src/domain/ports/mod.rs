//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod login_service;
mod user_directory;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, LoginServiceError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{DirectoryPage, UserDirectory, UserDirectoryError};
