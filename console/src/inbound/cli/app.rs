//! Command execution against the view-state engine, plus the composition
//! root that wires adapters from settings.

use std::sync::Arc;

use camino::Utf8PathBuf;
use color_eyre::eyre::{Context, Result, eyre};
use example_data::SeedRegistry;
use serde::Serialize;
use tracing::{debug, info};

use super::args::{Command, EditArgs, LoginArgs, UsersArgs};
use crate::config::ConsoleSettings;
use crate::domain::ports::{CredentialStore, LoginService, UserDirectory};
use crate::domain::{
    CollectionState, CollectionStore, Error, LoginCredentials, PageLoad, Route, RouteDecision,
    SessionGate, UserId, UserPatch, UserRecord, ViewState, project,
};
use crate::outbound::credentials::FileCredentialStore;
use crate::outbound::http::{HttpEndpoint, HttpLoginService, HttpUserDirectory};
use crate::outbound::memory::{InMemoryLoginService, InMemoryUserDirectory};

/// Result of one console command, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A session was started.
    LoggedIn {
        /// Account that signed in.
        email: String,
    },
    /// `login` ran while a session was already held.
    AlreadyLoggedIn,
    /// The session was cleared.
    LoggedOut,
    /// Current session and data source.
    Status {
        /// Whether a session is held.
        authenticated: bool,
        /// Where records come from.
        source: String,
    },
    /// One projected page of users.
    Users {
        /// The page as held by the store.
        #[serde(flatten)]
        page: PageSummary,
        /// The view applied to the page.
        view: ViewState,
        /// Records after filtering and sorting.
        shown: Vec<UserRecord>,
    },
    /// A single record.
    User {
        /// The record.
        user: UserRecord,
    },
    /// A record after a successful edit.
    Updated {
        /// The record with the patch applied.
        user: UserRecord,
    },
    /// A record was deleted.
    Deleted {
        /// Id of the deleted record.
        id: UserId,
    },
}

/// Paging facts for a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Page shown.
    pub current_page: u32,
    /// Pages available.
    pub total_pages: u32,
    /// Records on the page before filtering.
    pub loaded: usize,
}

impl From<&CollectionState> for PageSummary {
    fn from(state: &CollectionState) -> Self {
        Self {
            current_page: state.current_page().get(),
            total_pages: state.total_pages(),
            loaded: state.records().len(),
        }
    }
}

/// The engine behind the command line: one store, one gate, one login port.
pub struct Console {
    store: CollectionStore<dyn UserDirectory>,
    session: SessionGate<dyn CredentialStore>,
    login: Arc<dyn LoginService>,
    source: String,
}

impl Console {
    /// Assemble a console from already built adapters.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted session cannot be read.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        credentials: Arc<dyn CredentialStore>,
        login: Arc<dyn LoginService>,
        source: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            store: CollectionStore::new(directory),
            session: SessionGate::restore(credentials)?,
            login,
            source: source.into(),
        })
    }

    /// Collection store driven by this console.
    pub fn store(&self) -> &CollectionStore<dyn UserDirectory> {
        &self.store
    }

    /// Session gate driven by this console.
    pub fn session(&self) -> &SessionGate<dyn CredentialStore> {
        &self.session
    }

    fn require(&self, route: Route) -> Result<(), Error> {
        match self.session.guard(route) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect(target) => {
                debug!(%route, %target, "route guard redirected");
                Err(Error::unauthorized(format!(
                    "{route} requires a session; run `admin-console login` first"
                )))
            }
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns the domain error of the first failing step; state is left as
    /// the failing operation leaves it.
    pub async fn execute(&self, command: Command) -> Result<Outcome, Error> {
        match command {
            Command::Login(args) => self.login(args).await,
            Command::Logout => {
                self.session.logout()?;
                Ok(Outcome::LoggedOut)
            }
            Command::Status => Ok(Outcome::Status {
                authenticated: self.session.is_authenticated(),
                source: self.source.clone(),
            }),
            Command::Users(args) => self.users(args).await,
            Command::Show { id } => {
                self.require(Route::EditUser(id))?;
                let user = self.store.get_or_fetch(id).await?;
                Ok(Outcome::User { user })
            }
            Command::Edit(args) => self.edit(args).await,
            Command::Delete { id } => {
                self.require(Route::Users)?;
                self.store.apply_delete(id).await?;
                info!(id = id.get(), "user deleted");
                Ok(Outcome::Deleted { id })
            }
        }
    }

    async fn login(&self, args: LoginArgs) -> Result<Outcome, Error> {
        if self.session.guard(Route::Login) != RouteDecision::Allow {
            return Ok(Outcome::AlreadyLoggedIn);
        }
        let credentials = LoginCredentials::try_from_parts(&args.email, &args.password)?;
        self.session
            .authenticate(self.login.as_ref(), &credentials)
            .await?;
        Ok(Outcome::LoggedIn {
            email: credentials.email().to_owned(),
        })
    }

    async fn users(&self, args: UsersArgs) -> Result<Outcome, Error> {
        self.require(Route::Users)?;
        match self.store.load_page(args.page).await? {
            PageLoad::Applied => {}
            PageLoad::OutOfRange => {
                return Err(Error::validation(format!(
                    "page {} is past the last page ({})",
                    args.page,
                    self.store.snapshot().total_pages()
                )));
            }
            outcome => debug!(?outcome, "page load did not apply"),
        }
        let state = self.store.snapshot();
        let view = ViewState::new(args.search, args.sort, args.order);
        let shown = project(state.records(), &view);
        Ok(Outcome::Users {
            page: PageSummary::from(state.as_ref()),
            view,
            shown,
        })
    }

    async fn edit(&self, args: EditArgs) -> Result<Outcome, Error> {
        self.require(Route::EditUser(args.id))?;
        let mut builder = UserPatch::builder();
        if let Some(first_name) = args.first_name {
            builder = builder.first_name(first_name);
        }
        if let Some(last_name) = args.last_name {
            builder = builder.last_name(last_name);
        }
        if let Some(email) = args.email {
            builder = builder.email(email);
        }
        let patch = builder.build()?;

        let current = self.store.get_or_fetch(args.id).await?;
        let merged = self.store.apply_update(args.id, &patch).await?;
        Ok(Outcome::Updated {
            user: merged.unwrap_or_else(|| current.merged(&patch)),
        })
    }
}

/// Wire adapters from `settings`.
///
/// # Errors
///
/// Returns a report when the credential directory, base URL, HTTP client or
/// offline seed cannot be set up.
pub fn build_console(settings: &ConsoleSettings) -> Result<Console> {
    let credential_dir = Utf8PathBuf::from_path_buf(settings.credential_dir())
        .map_err(|path| eyre!("credential directory {} is not UTF-8", path.display()))?;
    let credentials: Arc<dyn CredentialStore> = Arc::new(
        FileCredentialStore::open(&credential_dir).wrap_err("open credential store")?,
    );

    let (directory, login, source): (Arc<dyn UserDirectory>, Arc<dyn LoginService>, String) =
        match settings.offline_seed.as_deref() {
            Some(seed_name) => {
                let registry = match &settings.seed_registry {
                    Some(path) => SeedRegistry::from_file(path)
                        .wrap_err_with(|| format!("load seed registry {}", path.display()))?,
                    None => SeedRegistry::builtin().wrap_err("load builtin seed registry")?,
                };
                let seed = registry
                    .find_seed(seed_name)
                    .wrap_err_with(|| format!("find offline seed {seed_name}"))?;
                let directory: Arc<dyn UserDirectory> = Arc::new(
                    InMemoryUserDirectory::from_seed(seed, settings.per_page())
                        .wrap_err("generate offline users")?,
                );
                let login: Arc<dyn LoginService> = Arc::new(InMemoryLoginService::demo());
                (directory, login, format!("offline seed {seed_name}"))
            }
            None => {
                let base_url = settings.base_url().wrap_err("parse CONSOLE_BASE_URL")?;
                let mut endpoint = HttpEndpoint::new(base_url.clone(), settings.timeout());
                if let Some(key) = settings.api_key() {
                    endpoint = endpoint.with_api_key(key);
                }
                let directory: Arc<dyn UserDirectory> = Arc::new(
                    HttpUserDirectory::new(endpoint.clone()).wrap_err("build HTTP client")?,
                );
                let login: Arc<dyn LoginService> =
                    Arc::new(HttpLoginService::new(endpoint).wrap_err("build HTTP client")?);
                (directory, login, base_url.to_string())
            }
        };

    Console::new(directory, credentials, login, source).wrap_err("restore session")
}
