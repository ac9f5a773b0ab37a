//! Rendering of command outcomes and errors for the terminal.

use super::app::Outcome;
use super::args::OutputFormat;
use crate::domain::{Error, UserRecord};

/// Render `outcome` in the requested format.
///
/// # Errors
///
/// Returns the serialisation error when JSON output cannot be produced.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => serde_json::to_string_pretty(outcome),
    }
}

/// Render a domain error in the requested format.
pub fn render_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(error)
            .unwrap_or_else(|_| message_only_json(error)),
        OutputFormat::Text => {
            let hint = if error.is_retryable() { " (retry may succeed)" } else { "" };
            format!("error: {}{hint}", error.message())
        }
    }
}

fn message_only_json(error: &Error) -> String {
    serde_json::json!({ "message": error.message() }).to_string()
}

fn user_line(user: &UserRecord) -> String {
    format!(
        "{:>4}  {} {} <{}>",
        user.id(),
        user.first_name(),
        user.last_name(),
        user.email()
    )
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::LoggedIn { email } => format!("signed in as {email}"),
        Outcome::AlreadyLoggedIn => "already signed in".to_owned(),
        Outcome::LoggedOut => "signed out".to_owned(),
        Outcome::Status {
            authenticated,
            source,
        } => {
            let session = if *authenticated { "signed in" } else { "signed out" };
            format!("{session}; directory: {source}")
        }
        Outcome::Users { page, view, shown } => {
            let mut out = format!(
                "page {} of {} ({} shown of {} loaded; sort {} {}",
                page.current_page,
                page.total_pages,
                shown.len(),
                page.loaded,
                view.sort_key,
                view.sort_order
            );
            if !view.search_term.is_empty() {
                out.push_str(&format!("; search \"{}\"", view.search_term));
            }
            out.push(')');
            for user in shown {
                out.push('\n');
                out.push_str(&user_line(user));
            }
            if shown.is_empty() {
                out.push_str("\nno users found");
            }
            out
        }
        Outcome::User { user } => format!("{}\n      avatar: {}", user_line(user), user.avatar()),
        Outcome::Updated { user } => format!("updated\n{}", user_line(user)),
        Outcome::Deleted { id } => format!("deleted user {id}"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for outcome rendering.
    use super::*;
    use crate::domain::{SortKey, SortOrder, UserId, ViewState};
    use crate::inbound::cli::app::PageSummary;

    fn amy() -> UserRecord {
        UserRecord::new(
            UserId::new(2).expect("valid id"),
            "Amy",
            "Adams",
            "amy@x.com",
            "https://reqres.in/img/faces/2-image.jpg",
        )
    }

    #[test]
    fn users_page_lists_records_and_paging() {
        let outcome = Outcome::Users {
            page: PageSummary {
                current_page: 1,
                total_pages: 2,
                loaded: 6,
            },
            view: ViewState::new("am", SortKey::LastName, SortOrder::Descending),
            shown: vec![amy()],
        };

        let text = render(&outcome, OutputFormat::Text).expect("text renders");
        assert_eq!(
            text,
            "page 1 of 2 (1 shown of 6 loaded; sort last_name desc; search \"am\")\n   2  Amy Adams <amy@x.com>"
        );
    }

    #[test]
    fn empty_projection_says_so() {
        let outcome = Outcome::Users {
            page: PageSummary {
                current_page: 1,
                total_pages: 1,
                loaded: 0,
            },
            view: ViewState::default(),
            shown: Vec::new(),
        };
        let text = render(&outcome, OutputFormat::Text).expect("text renders");
        assert!(text.ends_with("no users found"));
    }

    #[test]
    fn json_output_is_tagged() {
        let json = render(&Outcome::Deleted { id: UserId::new(4).expect("valid id") }, OutputFormat::Json)
            .expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["outcome"], "deleted");
        assert_eq!(value["id"], 4);
    }

    #[test]
    fn users_json_flattens_paging() {
        let outcome = Outcome::Users {
            page: PageSummary {
                current_page: 2,
                total_pages: 2,
                loaded: 1,
            },
            view: ViewState::default(),
            shown: vec![amy()],
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&outcome, OutputFormat::Json).expect("json renders"))
                .expect("valid json");
        assert_eq!(value["outcome"], "users");
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["view"]["sort_key"], "first_name");
        assert_eq!(value["shown"][0]["first_name"], "Amy");
    }

    #[test]
    fn errors_mention_retryability() {
        let text = render_error(&Error::network("connection refused"), OutputFormat::Text);
        assert_eq!(text, "error: connection refused (retry may succeed)");

        let json = render_error(&Error::validation("bad email"), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["code"], "validation");
    }

    #[test]
    fn json_errors_escape_control_characters() {
        let error = Error::server("bad \u{1b}[31mbody\" here");

        for json in [render_error(&error, OutputFormat::Json), message_only_json(&error)] {
            let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
            assert_eq!(value["message"], "bad \u{1b}[31mbody\" here");
        }
    }
}
