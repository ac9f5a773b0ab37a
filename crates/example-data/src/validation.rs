//! Email shaping rules mirroring the console's edit-form validation.
//!
//! The console accepts addresses matching
//! `^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$`. Generated addresses use
//! a fixed domain, so only the local part needs checking here.

/// Domain used for every generated address.
pub const EMAIL_DOMAIN: &str = "example.test";

/// Validates an email local part against the console's pattern.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email_local_part;
///
/// assert!(is_valid_email_local_part("ada.lovelace"));
/// assert!(is_valid_email_local_part("o_brien+1"));
/// assert!(!is_valid_email_local_part(""));
/// assert!(!is_valid_email_local_part("o'brien"));
/// ```
#[must_use]
pub fn is_valid_email_local_part(local: &str) -> bool {
    !local.is_empty() && local.chars().all(is_valid_local_char)
}

const fn is_valid_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

/// Builds a lowercase `first.last` local part, dropping disallowed characters.
#[must_use]
pub(crate) fn email_local_part(first_name: &str, last_name: &str) -> String {
    let keep = |name: &str| -> String {
        name.chars()
            .filter(|c| is_valid_local_char(*c) && *c != '.')
            .flat_map(char::to_lowercase)
            .collect()
    };
    let first = keep(first_name);
    let last = keep(last_name);
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first}.{last}"),
        (false, true) => first,
        (true, false) => last,
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Janet", "Weaver", "janet.weaver")]
    #[case("Mary-Ann", "O'Neil", "mary-ann.oneil")]
    #[case("Zoë", "", "zo")]
    #[case("", "", "")]
    fn builds_local_parts(#[case] first: &str, #[case] last: &str, #[case] expected: &str) {
        assert_eq!(email_local_part(first, last), expected);
    }

    #[rstest]
    #[case("janet.weaver", true)]
    #[case("a%b+c-d_e", true)]
    #[case("with space", false)]
    #[case("", false)]
    fn validates_local_parts(#[case] local: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email_local_part(local), expected);
    }
}
