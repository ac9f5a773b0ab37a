//! Domain primitives, the view-state engine, and the session gate.
//!
//! Purpose: own the console's state and derivations without knowing how the
//! directory is reached or where credentials live. Adapters plug in through
//! the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: failure payload every operation returns.
//! - UserRecord / UserPatch: directory records and validated partial updates.
//! - CollectionStore: the current page plus last-issued-wins page loads.
//! - project / ViewState / ProjectionCache: pure filter and sort.
//! - SessionGate / Route: authentication state and route guarding.

pub mod auth;
pub mod collection;
pub mod error;
pub mod ports;
pub mod session;
pub mod user;
pub mod view;

pub use self::auth::{Credential, LoginCredentials, LoginValidationError};
pub use self::collection::{CollectionState, CollectionStore, PageLoad};
pub use self::error::{Error, ErrorCode};
pub use self::session::{
    CREDENTIAL_KEY, Route, RouteDecision, SessionGate, SessionState, UnknownRoute,
};
pub use self::user::{
    EmailAddress, PageNumber, UserId, UserPatch, UserPatchBuilder, UserRecord,
    UserValidationError,
};
pub use self::view::{ProjectionCache, SortKey, SortOrder, ViewParseError, ViewState, project};
