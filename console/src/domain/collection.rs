//! Collection store: the single owner of the current server page.
//!
//! Every operation calls the directory first and only then applies a state
//! transition. Page loads are last-issued-wins: each load takes a ticket from a
//! monotonic counter before awaiting, and a response whose ticket is no longer
//! the latest is dropped without touching state. Locks are never held across an
//! await point.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::ports::{DirectoryPage, UserDirectory, UserDirectoryError};
use crate::domain::{Error, PageNumber, UserId, UserPatch, UserRecord};

/// Snapshot of the page currently held by the store.
///
/// ## Invariants
/// - `records` holds exactly one server page, in server order.
/// - `1 <= current_page`, `1 <= total_pages`.
/// - `revision` increases on every successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionState {
    records: Vec<UserRecord>,
    current_page: PageNumber,
    total_pages: u32,
    revision: u64,
}

impl CollectionState {
    /// Records of the current page.
    pub fn records(&self) -> &[UserRecord] {
        self.records.as_slice()
    }

    /// Page the records came from.
    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Total pages reported by the most recent applied load.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Change counter for cheap invalidation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Local record with the given id, if it is on this page.
    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn has_next(&self) -> Option<PageNumber> {
        self.current_page.next_within(self.total_pages)
    }
}

impl Default for CollectionState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            current_page: PageNumber::FIRST,
            total_pages: 1,
            revision: 0,
        }
    }
}

/// Outcome of a page load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// The response was the latest issued and replaced the state.
    Applied,
    /// A later load was issued first; the response was discarded.
    Superseded,
    /// The page lies outside the known bounds; the state is unchanged.
    OutOfRange,
}

/// Store holding the current page and applying remote mutations locally.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use admin_console::domain::{CollectionStore, PageNumber};
/// use admin_console::outbound::memory::InMemoryUserDirectory;
///
/// # async fn demo() -> Result<(), admin_console::domain::Error> {
/// let store = CollectionStore::new(Arc::new(InMemoryUserDirectory::default()));
/// store.load_page(PageNumber::FIRST).await?;
/// assert_eq!(store.snapshot().current_page(), PageNumber::FIRST);
/// # Ok(())
/// # }
/// ```
pub struct CollectionStore<D: ?Sized> {
    directory: Arc<D>,
    state: RwLock<Arc<CollectionState>>,
    latest_ticket: AtomicU64,
}

impl<D: ?Sized> CollectionStore<D> {
    /// Create an empty store backed by `directory`.
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            state: RwLock::new(Arc::new(CollectionState::default())),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Cheap shared read of the current state.
    pub fn snapshot(&self) -> Arc<CollectionState> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn issue_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn mutate<R>(&self, apply: impl FnOnce(&mut CollectionState) -> Option<R>) -> Option<R> {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = CollectionState::clone(&guard);
        let outcome = apply(&mut next)?;
        next.revision += 1;
        *guard = Arc::new(next);
        Some(outcome)
    }
}

impl<D> CollectionStore<D>
where
    D: UserDirectory + ?Sized,
{
    fn map_directory_error(error: UserDirectoryError) -> Error {
        let message = error.to_string();
        match error {
            UserDirectoryError::Network { .. } => Error::network(message),
            UserDirectoryError::Server { .. } | UserDirectoryError::Decode { .. } => {
                Error::server(message)
            }
            UserDirectoryError::NotFound { .. } => Error::not_found(message),
        }
    }

    /// Load `page` and make it current, unless a later load was issued while
    /// this one was in flight.
    ///
    /// Superseded responses are discarded whether they succeeded or failed.
    /// A page past the reported `total_pages` leaves the state untouched and
    /// yields [`PageLoad::OutOfRange`].
    pub async fn load_page(&self, page: PageNumber) -> Result<PageLoad, Error> {
        let ticket = self.issue_ticket();
        debug!(ticket, page = page.get(), "loading directory page");
        let result = self.directory.list_page(page).await;

        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket != latest {
            debug!(ticket, latest, page = page.get(), "discarding superseded page response");
            return Ok(PageLoad::Superseded);
        }

        let DirectoryPage {
            records,
            total_pages,
        } = result.map_err(|error| {
            warn!(ticket, page = page.get(), %error, "page load failed");
            Self::map_directory_error(error)
        })?;

        let total_pages = total_pages.max(1);
        if page.get() > total_pages {
            debug!(page = page.get(), total_pages, "requested page is past the last page");
            return Ok(PageLoad::OutOfRange);
        }

        let next = CollectionState {
            records,
            current_page: page,
            total_pages,
            revision: guard.revision + 1,
        };
        debug!(
            page = page.get(),
            total_pages = next.total_pages,
            count = next.records.len(),
            revision = next.revision,
            "applied directory page"
        );
        *guard = Arc::new(next);
        Ok(PageLoad::Applied)
    }

    /// Load the page after the current one, if there is one.
    pub async fn next_page(&self) -> Result<PageLoad, Error> {
        match self.snapshot().has_next() {
            Some(page) => self.load_page(page).await,
            None => Ok(PageLoad::OutOfRange),
        }
    }

    /// Load the page before the current one, if there is one.
    pub async fn previous_page(&self) -> Result<PageLoad, Error> {
        match self.snapshot().current_page.previous() {
            Some(page) => self.load_page(page).await,
            None => Ok(PageLoad::OutOfRange),
        }
    }

    /// Return the local record, or fetch it without caching it.
    pub async fn get_or_fetch(&self, id: UserId) -> Result<UserRecord, Error> {
        if let Some(record) = self.snapshot().find(id) {
            return Ok(record.clone());
        }
        debug!(id = id.get(), "record not on current page; fetching");
        self.directory.fetch_one(id).await.map_err(|error| {
            warn!(id = id.get(), %error, "fetch failed");
            Self::map_directory_error(error)
        })
    }

    /// Send `patch` to the directory, then merge it into the local record.
    ///
    /// Returns the merged record when it was on the current page.
    pub async fn apply_update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, Error> {
        self.directory.update(id, patch).await.map_err(|error| {
            warn!(id = id.get(), %error, "update failed");
            Self::map_directory_error(error)
        })?;

        let merged = self.mutate(|state| {
            let record = state.records.iter_mut().find(|record| record.id() == id)?;
            *record = record.merged(patch);
            Some(record.clone())
        });
        debug!(id = id.get(), local = merged.is_some(), "applied update");
        Ok(merged)
    }

    /// Delete the record remotely, then drop it from the current page.
    ///
    /// `total_pages` is left as reported by the last load.
    pub async fn apply_delete(&self, id: UserId) -> Result<(), Error> {
        self.directory.delete(id).await.map_err(|error| {
            warn!(id = id.get(), %error, "delete failed");
            Self::map_directory_error(error)
        })?;

        let removed = self.mutate(|state| {
            let index = state.records.iter().position(|record| record.id() == id)?;
            Some(state.records.remove(index))
        });
        debug!(id = id.get(), local = removed.is_some(), "applied delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
