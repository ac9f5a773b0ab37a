//! In-memory user directory for offline use and tests.
//!
//! Pages are sliced from an ordered record list the same way the remote API
//! paginates. Updates and deletes mutate the list, so later loads see them.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use example_data::{ExampleUserSeed, GenerationError, SeedDefinition, generate_example_users};
use tracing::debug;

use crate::domain::ports::{
    DirectoryPage, LoginService, LoginServiceError, UserDirectory, UserDirectoryError,
};
use crate::domain::{Credential, LoginCredentials, PageNumber, UserId, UserPatch, UserRecord};

/// Records per page when none is configured.
pub const DEFAULT_PER_PAGE: usize = 6;

/// Process-local directory backed by a record list.
#[derive(Debug)]
pub struct InMemoryUserDirectory {
    records: Mutex<Vec<UserRecord>>,
    per_page: usize,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PER_PAGE)
    }
}

impl InMemoryUserDirectory {
    /// Directory serving `records` in the given order, `per_page` at a time.
    ///
    /// A `per_page` of zero is treated as one.
    pub fn new(records: Vec<UserRecord>, per_page: usize) -> Self {
        Self {
            records: Mutex::new(records),
            per_page: per_page.max(1),
        }
    }

    /// Directory populated from a deterministic example-data seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the seed cannot produce users.
    pub fn from_seed(seed: &SeedDefinition, per_page: usize) -> Result<Self, GenerationError> {
        let records = generate_example_users(seed)?
            .into_iter()
            .filter_map(record_from_seed)
            .collect();
        Ok(Self::new(records, per_page))
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UserRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn record_from_seed(seed: ExampleUserSeed) -> Option<UserRecord> {
    let id = UserId::new(seed.id).ok()?;
    Some(UserRecord::new(
        id,
        seed.first_name,
        seed.last_name,
        seed.email,
        seed.avatar,
    ))
}

fn missing(id: UserId) -> UserDirectoryError {
    UserDirectoryError::server(404_u16, format!("user {id} not found"))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_page(&self, page: PageNumber) -> Result<DirectoryPage, UserDirectoryError> {
        let records = self.lock();
        let total_pages = records.len().div_ceil(self.per_page);
        let start = (page.get() as usize - 1).saturating_mul(self.per_page);
        let slice = records
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect();
        debug!(page = page.get(), total_pages, "served in-memory page");
        Ok(DirectoryPage {
            records: slice,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        })
    }

    async fn fetch_one(&self, id: UserId) -> Result<UserRecord, UserDirectoryError> {
        self.lock()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| UserDirectoryError::not_found(id.get()))
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), UserDirectoryError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| missing(id))?;
        *record = record.merged(patch);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserDirectoryError> {
        let mut records = self.lock();
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| missing(id))?;
        records.remove(index);
        Ok(())
    }
}

/// Login service accepting a fixed set of accounts without any network.
#[derive(Debug, Clone)]
pub struct InMemoryLoginService {
    accounts: Vec<(String, String)>,
    token: String,
}

impl InMemoryLoginService {
    /// Service issuing `token` to any of `accounts`.
    pub fn new(accounts: Vec<(String, String)>, token: impl Into<String>) -> Self {
        Self {
            accounts,
            token: token.into(),
        }
    }

    /// The public reqres demo account.
    pub fn demo() -> Self {
        Self::new(
            vec![("eve.holt@reqres.in".to_owned(), "cityslicka".to_owned())],
            "QpwL5tke4Pnpja7X4",
        )
    }
}

#[async_trait]
impl LoginService for InMemoryLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Credential, LoginServiceError> {
        let known = self.accounts.iter().any(|(email, password)| {
            email.eq_ignore_ascii_case(credentials.email()) && password == credentials.password()
        });
        if !known {
            return Err(LoginServiceError::rejected("user not found"));
        }
        Credential::new(self.token.as_str())
            .map_err(|error| LoginServiceError::server(error.to_string()))
    }
}
