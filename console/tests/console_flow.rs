//! End-to-end console flows over the offline adapters.

use std::sync::Arc;

use admin_console::domain::ports::{
    CredentialStore, InMemoryCredentialStore, LoginService, UserDirectory,
};
use admin_console::domain::{CREDENTIAL_KEY, ErrorCode, UserRecord};
use admin_console::inbound::cli::{Cli, Command, Console, Outcome};
use admin_console::outbound::credentials::FileCredentialStore;
use admin_console::outbound::memory::{
    DEFAULT_PER_PAGE, InMemoryLoginService, InMemoryUserDirectory,
};
use camino::Utf8Path;
use clap::Parser;
use example_data::SeedRegistry;
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn seeded_directory() -> Arc<InMemoryUserDirectory> {
    let registry = SeedRegistry::builtin().expect("builtin registry");
    let seed = registry.find_seed("reqres-classic").expect("classic seed");
    Arc::new(InMemoryUserDirectory::from_seed(seed, DEFAULT_PER_PAGE).expect("seeded users"))
}

fn console_over(
    directory: Arc<InMemoryUserDirectory>,
    credentials: Arc<dyn CredentialStore>,
) -> Console {
    let directory: Arc<dyn UserDirectory> = directory;
    let login: Arc<dyn LoginService> = Arc::new(InMemoryLoginService::demo());
    Console::new(directory, credentials, login, "offline seed reqres-classic")
        .expect("session restores")
}

fn command(args: &[&str]) -> Command {
    let argv = std::iter::once("admin-console").chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("valid command line").command
}

async fn listed_users(console: &Console, args: &[&str]) -> Vec<UserRecord> {
    let mut argv = vec!["users"];
    argv.extend_from_slice(args);
    match console.execute(command(&argv)).await.expect("users listed") {
        Outcome::Users { shown, .. } => shown,
        other => panic!("expected a users outcome, got {other:?}"),
    }
}

struct Harness {
    directory: Arc<InMemoryUserDirectory>,
    credentials: Arc<InMemoryCredentialStore>,
    console: Console,
}

#[fixture]
fn harness() -> Harness {
    let directory = seeded_directory();
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let console = console_over(Arc::clone(&directory), credentials.clone());
    Harness {
        directory,
        credentials,
        console,
    }
}

#[rstest]
#[case::users(&["users"])]
#[case::show(&["show", "2"])]
#[case::edit(&["edit", "2", "--first-name", "Jan"])]
#[case::delete(&["delete", "2"])]
#[tokio::test]
async fn guarded_commands_need_a_session(harness: Harness, #[case] args: &[&str]) {
    let error = harness
        .console
        .execute(command(args))
        .await
        .expect_err("no session yet");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(harness.directory.len(), 12);
}

#[rstest]
#[tokio::test]
async fn login_persists_token_once(harness: Harness) {
    let first = harness.console.execute(command(&["login"])).await;
    assert_eq!(
        first,
        Ok(Outcome::LoggedIn {
            email: "eve.holt@reqres.in".to_owned()
        })
    );
    assert_eq!(
        harness.credentials.read(CREDENTIAL_KEY),
        Ok(Some("QpwL5tke4Pnpja7X4".to_owned()))
    );

    let second = harness.console.execute(command(&["login"])).await;
    assert_eq!(second, Ok(Outcome::AlreadyLoggedIn));
}

#[rstest]
#[tokio::test]
async fn rejected_login_leaves_session_empty(harness: Harness) {
    let error = harness
        .console
        .execute(command(&["login", "--email", "eve.holt@reqres.in", "--password", "wrong"]))
        .await
        .expect_err("wrong password");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert!(!harness.console.session().is_authenticated());
    assert_eq!(harness.credentials.read(CREDENTIAL_KEY), Ok(None));
}

#[rstest]
#[tokio::test]
async fn invalid_login_input_is_a_validation_error(harness: Harness) {
    let error = harness
        .console
        .execute(command(&["login", "--email", "not-an-email"]))
        .await
        .expect_err("malformed email");

    assert_eq!(error.code(), ErrorCode::Validation);
}

#[rstest]
#[tokio::test]
async fn listing_projects_the_loaded_page(harness: Harness) {
    harness
        .console
        .execute(command(&["login"]))
        .await
        .expect("login");

    let outcome = harness
        .console
        .execute(command(&["users", "--sort", "last_name", "--order", "desc"]))
        .await
        .expect("users listed");
    let Outcome::Users { page, shown, .. } = outcome else {
        panic!("expected a users outcome");
    };
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.loaded, DEFAULT_PER_PAGE);
    assert_eq!(shown.len(), DEFAULT_PER_PAGE);
    assert!(shown.windows(2).all(|pair| {
        pair[0].last_name().to_lowercase() >= pair[1].last_name().to_lowercase()
    }));

    let needle = shown[0].first_name().to_lowercase();
    let filtered = shown_for(&harness.console, &needle).await;
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|record| {
        [record.first_name(), record.last_name(), record.email()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }));
    assert_eq!(harness.console.store().snapshot().records().len(), DEFAULT_PER_PAGE);

    let second = listed_users(&harness.console, &["--page", "2"]).await;
    assert_eq!(second.len(), 12 - DEFAULT_PER_PAGE);
    assert_eq!(harness.console.store().snapshot().current_page().get(), 2);
}

async fn shown_for(console: &Console, needle: &str) -> Vec<UserRecord> {
    listed_users(console, &["--search", &needle.to_uppercase()]).await
}

#[rstest]
#[tokio::test]
async fn edit_then_delete_round_trip(harness: Harness) {
    let console = &harness.console;
    console.execute(command(&["login"])).await.expect("login");
    let listed = listed_users(console, &[]).await;
    let target = listed[0].id().to_string();

    let updated = console
        .execute(command(&["edit", &target, "--email", "edited@example.com"]))
        .await
        .expect("edit applies");
    let Outcome::Updated { user } = updated else {
        panic!("expected an updated outcome");
    };
    assert_eq!(user.email(), "edited@example.com");
    assert_eq!(user.first_name(), listed[0].first_name());

    let Ok(Outcome::User { user }) = console.execute(command(&["show", &target])).await else {
        panic!("expected the edited user");
    };
    assert_eq!(user.email(), "edited@example.com");

    let invalid = console
        .execute(command(&["edit", &target, "--email", "broken"]))
        .await
        .expect_err("invalid email");
    assert_eq!(invalid.code(), ErrorCode::Validation);

    console
        .execute(command(&["delete", &target]))
        .await
        .expect("delete applies");
    assert_eq!(harness.directory.len(), 11);
    assert_eq!(
        console.store().snapshot().records().len(),
        DEFAULT_PER_PAGE - 1
    );
    assert_eq!(console.store().snapshot().total_pages(), 2);

    let gone = console
        .execute(command(&["show", &target]))
        .await
        .expect_err("deleted user");
    assert_eq!(gone.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn logout_closes_guarded_routes(harness: Harness) {
    let console = &harness.console;
    console.execute(command(&["login"])).await.expect("login");
    assert_eq!(
        console.execute(command(&["logout"])).await,
        Ok(Outcome::LoggedOut)
    );

    assert_eq!(harness.credentials.read(CREDENTIAL_KEY), Ok(None));
    let error = console
        .execute(command(&["users"]))
        .await
        .expect_err("session closed");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

fn file_store(root: &TempDir) -> Arc<dyn CredentialStore> {
    let path = Utf8Path::from_path(root.path())
        .expect("utf-8 temp dir")
        .join("session");
    Arc::new(FileCredentialStore::open(&path).expect("credential store opens"))
}

fn status(outcome: Outcome) -> bool {
    match outcome {
        Outcome::Status { authenticated, .. } => authenticated,
        other => panic!("expected a status outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn session_survives_restart_until_logout() {
    let root = TempDir::new().expect("temp dir");
    let directory = seeded_directory();

    let first = console_over(Arc::clone(&directory), file_store(&root));
    assert!(!status(first.execute(Command::Status).await.expect("status")));
    first.execute(command(&["login"])).await.expect("login");
    drop(first);

    let second = console_over(Arc::clone(&directory), file_store(&root));
    assert!(status(second.execute(Command::Status).await.expect("status")));
    listed_users(&second, &[]).await;
    second.execute(Command::Logout).await.expect("logout");
    drop(second);

    let third = console_over(directory, file_store(&root));
    assert!(!status(third.execute(Command::Status).await.expect("status")));
}

#[rstest]
#[tokio::test]
async fn page_past_the_end_is_rejected(harness: Harness) {
    let console = &harness.console;
    console.execute(command(&["login"])).await.expect("login");
    listed_users(console, &[]).await;
    let before = console.store().snapshot();

    let error = console
        .execute(command(&["users", "--page", "9"]))
        .await
        .expect_err("only two pages exist");

    assert_eq!(error.code(), ErrorCode::Validation);
    assert_eq!(error.message(), "page 9 is past the last page (2)");
    assert_eq!(console.store().snapshot(), before);
}
