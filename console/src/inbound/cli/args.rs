//! Command-line argument tree.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{PageNumber, SortKey, SortOrder, UserId};

/// `admin-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "admin-console",
    about = "Browse, search, edit and delete users of a reqres-style directory",
    version
)]
pub struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    pub json_logs: bool,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Console commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token.
    Login(LoginArgs),
    /// Forget the persisted session token.
    Logout,
    /// Show whether a session is held.
    Status,
    /// List one page of users.
    Users(UsersArgs),
    /// Show one user.
    Show {
        /// User id.
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    /// Change a user's name or email.
    Edit(EditArgs),
    /// Delete a user.
    Delete {
        /// User id.
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
}

/// Arguments for `login`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long, default_value = "eve.holt@reqres.in")]
    pub email: String,
    /// Account password.
    #[arg(long, default_value = "cityslicka")]
    pub password: String,
}

/// Arguments for `users`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct UsersArgs {
    /// Page to load.
    #[arg(long, default_value = "1", value_parser = parse_page)]
    pub page: PageNumber,
    /// Case-insensitive filter on name or email.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Field to sort by: first_name, last_name or email.
    #[arg(long, default_value = "first_name", value_parser = parse_sort_key)]
    pub sort: SortKey,
    /// Sort direction: asc or desc.
    #[arg(long, default_value = "asc", value_parser = parse_sort_order)]
    pub order: SortOrder,
}

/// Arguments for `edit`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct EditArgs {
    /// User id.
    #[arg(value_parser = parse_user_id)]
    pub id: UserId,
    /// New first name.
    #[arg(long)]
    pub first_name: Option<String>,
    /// New last name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// New email address.
    #[arg(long)]
    pub email: Option<String>,
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

fn parse_page(raw: &str) -> Result<PageNumber, String> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("page must be a positive integer: {error}"))?;
    PageNumber::new(value).map_err(|error| error.to_string())
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    raw.parse().map_err(|error| format!("{error}"))
}
