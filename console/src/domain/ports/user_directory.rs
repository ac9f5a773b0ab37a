//! Driven port for the remote user directory.
//!
//! The domain owns the page shape and the failure taxonomy so the collection
//! store stays adapter-agnostic. Adapters perform no retries.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{PageNumber, UserId, UserPatch, UserRecord};

/// One server page of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPage {
    /// Records in server order.
    pub records: Vec<UserRecord>,
    /// Total page count reported by the server.
    pub total_pages: u32,
}

define_port_error! {
    /// Errors surfaced while calling the directory.
    pub enum UserDirectoryError {
        /// Transport failed before a response arrived.
        Network { message: String } =>
            "directory unreachable: {message}",
        /// The server answered with a non-success status.
        Server { status: u16, message: String } =>
            "directory returned status {status}: {message}",
        /// A success response carried a body that could not be decoded.
        Decode { message: String } =>
            "directory response decode failed: {message}",
        /// The requested record does not exist.
        NotFound { id: u64 } =>
            "user {id} not found",
    }
}

/// Port wrapping the four remote directory operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one page of records plus the total page count.
    async fn list_page(&self, page: PageNumber) -> Result<DirectoryPage, UserDirectoryError>;

    /// Fetch a single record by id.
    async fn fetch_one(&self, id: UserId) -> Result<UserRecord, UserDirectoryError>;

    /// Send changed fields; the response body is ignored.
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), UserDirectoryError>;

    /// Remove a record.
    async fn delete(&self, id: UserId) -> Result<(), UserDirectoryError>;
}
