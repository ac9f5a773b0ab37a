//! Session gate: authentication state, its durable persistence, and route
//! access decisions.
//!
//! Storage is written before the in-memory state changes, so a failed write
//! never leaves the gate claiming a session that would not survive a restart.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::domain::ports::{CredentialStore, CredentialStoreError, LoginService, LoginServiceError};
use crate::domain::{Credential, Error, LoginCredentials, UserId};

/// Storage key under which the session token is persisted.
pub const CREDENTIAL_KEY: &str = "token";

/// Authentication state of the console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No credential is held.
    #[default]
    Unauthenticated,
    /// A credential from a prior successful login is held.
    Authenticated(Credential),
}

/// Navigable console locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: the login landing page.
    Login,
    /// `/users`: the paginated directory.
    Users,
    /// `/users/{id}/edit`: the edit form for one record.
    EditUser(UserId),
}

impl Route {
    fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/"),
            Self::Users => f.write_str("/users"),
            Self::EditUser(id) => write!(f, "/users/{id}/edit"),
        }
    }
}

/// Error returned for paths that name no console route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route '{0}'")]
pub struct UnknownRoute(String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = trimmed.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').skip(1).collect();
        match segments.as_slice() {
            [] if trimmed.starts_with('/') => Ok(Self::Login),
            ["users"] => Ok(Self::Users),
            ["users", id, "edit"] => id
                .parse::<UserId>()
                .map(Self::EditUser)
                .map_err(|_| UnknownRoute(trimmed.to_owned())),
            _ => Err(UnknownRoute(trimmed.to_owned())),
        }
    }
}

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested route.
    Allow,
    /// Replace the requested route with another.
    Redirect(Route),
}

/// Owns the session state and keeps it in step with durable storage.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use admin_console::domain::{Credential, Route, RouteDecision, SessionGate};
/// use admin_console::domain::ports::InMemoryCredentialStore;
///
/// let gate = SessionGate::restore(Arc::new(InMemoryCredentialStore::new())).unwrap();
/// assert_eq!(gate.guard(Route::Users), RouteDecision::Redirect(Route::Login));
///
/// gate.login(Credential::new("QpwL5tke4Pnpja7X4").unwrap()).unwrap();
/// assert!(gate.is_authenticated());
/// ```
pub struct SessionGate<S: ?Sized> {
    store: Arc<S>,
    state: RwLock<SessionState>,
}

impl<S> SessionGate<S>
where
    S: CredentialStore + ?Sized,
{
    fn map_store_error(error: CredentialStoreError) -> Error {
        Error::storage(error.to_string())
    }

    fn map_login_error(error: LoginServiceError) -> Error {
        let message = error.to_string();
        match error {
            LoginServiceError::Rejected { .. } => Error::unauthorized(message),
            LoginServiceError::Network { .. } => Error::network(message),
            LoginServiceError::Server { .. } => Error::server(message),
        }
    }

    /// Build a gate from whatever `store` holds under [`CREDENTIAL_KEY`].
    ///
    /// A blank stored value is treated as no session.
    pub fn restore(store: Arc<S>) -> Result<Self, Error> {
        let stored = store
            .read(CREDENTIAL_KEY)
            .map_err(Self::map_store_error)?;
        let state = match stored.map(Credential::new) {
            Some(Ok(credential)) => SessionState::Authenticated(credential),
            Some(Err(error)) => {
                warn!(%error, "ignoring unusable stored credential");
                SessionState::Unauthenticated
            }
            None => SessionState::Unauthenticated,
        };
        info!(authenticated = matches!(state, SessionState::Authenticated(_)), "session restored");
        Ok(Self {
            store,
            state: RwLock::new(state),
        })
    }

    /// Persist `credential`, then become authenticated.
    pub fn login(&self, credential: Credential) -> Result<(), Error> {
        self.store
            .write(CREDENTIAL_KEY, credential.expose())
            .map_err(|error| {
                warn!(%error, "failed to persist credential");
                Self::map_store_error(error)
            })?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Authenticated(credential);
        info!("session started");
        Ok(())
    }

    /// Clear the stored credential, then become unauthenticated.
    ///
    /// If storage cannot be cleared the state is left as it was.
    pub fn logout(&self) -> Result<(), Error> {
        self.store.remove(CREDENTIAL_KEY).map_err(|error| {
            warn!(%error, "failed to clear credential");
            Self::map_store_error(error)
        })?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::Unauthenticated;
        info!("session ended");
        Ok(())
    }

    /// Exchange `credentials` for a token through `service`, then log in.
    ///
    /// On failure nothing is persisted and the state is unchanged.
    pub async fn authenticate<L>(
        &self,
        service: &L,
        credentials: &LoginCredentials,
    ) -> Result<(), Error>
    where
        L: LoginService + ?Sized,
    {
        let credential = service.login(credentials).await.map_err(|error| {
            warn!(email = credentials.email(), %error, "login failed");
            Self::map_login_error(error)
        })?;
        self.login(credential)
    }
}

impl<S: ?Sized> SessionGate<S> {
    /// Whether a credential is held.
    pub fn is_authenticated(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            SessionState::Authenticated(_)
        )
    }

    /// Copy of the current state.
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Decide whether `route` may be shown in the current state.
    ///
    /// Protected routes send unauthenticated operators to the login page; the
    /// login page sends authenticated operators to the directory.
    pub fn guard(&self, route: Route) -> RouteDecision {
        match (route.is_protected(), self.is_authenticated()) {
            (true, false) => RouteDecision::Redirect(Route::Login),
            (false, true) => RouteDecision::Redirect(Route::Users),
            _ => RouteDecision::Allow,
        }
    }
}
