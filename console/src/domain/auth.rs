//! Authentication primitives: login credentials and the opaque session token.
//!
//! Keep form parsing outside the domain by exposing constructors that
//! validate string inputs before the session gate talks to a port.

use std::fmt;

use zeroize::Zeroizing;

use super::user::EmailAddress;

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was blank or did not match the email pattern.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// The server issued a blank token.
    EmptyToken,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "please enter a valid email address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyToken => write!(f, "credential token must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for super::Error {
    fn from(value: LoginValidationError) -> Self {
        Self::validation(value.to_string())
    }
}

/// Validated login form input.
///
/// ## Invariants
/// - `email` matches the console's email pattern.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use admin_console::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("eve.holt@reqres.in", "cityslicka").unwrap();
/// assert_eq!(creds.email(), "eve.holt@reqres.in");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email submitted to the login endpoint.
    pub fn email(&self) -> &str {
        self.email.as_ref()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque token proving a prior successful login.
///
/// The console never parses it; presence alone means "authenticated".
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Result<Self, LoginValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(LoginValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(token)))
    }

    /// Raw token for persistence or request headers.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
