//! Directory user data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised before anything is sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    InvalidPage,
    EmptyFirstName,
    EmptyLastName,
    InvalidEmail,
    EmptyPatch,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::InvalidPage => write!(f, "page number must be at least 1"),
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::InvalidEmail => write!(f, "please enter a valid email address"),
            Self::EmptyPatch => write!(f, "an update must change at least one field"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<UserValidationError> for super::Error {
    fn from(value: UserValidationError) -> Self {
        Self::validation(value.to_string())
    }
}

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: u64) -> Result<Self, UserValidationError> {
        if id == 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value used in request paths.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a [`PageNumber`].
    pub fn new(page: u32) -> Result<Self, UserValidationError> {
        if page == 0 {
            return Err(UserValidationError::InvalidPage);
        }
        Ok(Self(page))
    }

    /// Raw page value used in query strings.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following page, or `None` past `last`.
    pub fn next_within(self, last: u32) -> Option<Self> {
        let next = self.0.checked_add(1)?;
        (next <= last).then_some(Self(next))
    }

    /// The preceding page, or `None` before the first page.
    pub fn previous(self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// A user record as the directory serves it.
///
/// Records decoded from the server are taken as-is; only outgoing patches are
/// validated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    avatar: String,
}

impl UserRecord {
    /// Build a record from its parts.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Avatar image URI.
    pub fn avatar(&self) -> &str {
        self.avatar.as_str()
    }

    /// Return a copy with the patch's fields overwritten.
    ///
    /// Identity and avatar are never touched.
    #[must_use]
    pub fn merged(&self, patch: &UserPatch) -> Self {
        let mut merged = self.clone();
        if let Some(first_name) = &patch.first_name {
            merged.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &patch.last_name {
            merged.last_name.clone_from(last_name);
        }
        if let Some(email) = &patch.email {
            merged.email = email.as_ref().to_owned();
        }
        merged
    }
}

/// Partial update of a user's editable fields.
///
/// ## Invariants
/// - At least one field is set.
/// - Set names are non-empty once trimmed.
/// - A set email matches the console's email pattern.
///
/// Serialises to a JSON object holding only the set fields.
///
/// # Examples
/// ```
/// use admin_console::domain::UserPatch;
///
/// let patch = UserPatch::builder().email("new@x.com").build().unwrap();
/// assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"email":"new@x.com"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<EmailAddress>,
}

impl UserPatch {
    /// Start building a patch.
    pub fn builder() -> UserPatchBuilder {
        UserPatchBuilder::default()
    }

    /// New first name, if changed.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// New last name, if changed.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// New email, if changed.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}

/// Builder collecting raw form input for a [`UserPatch`].
#[derive(Debug, Clone, Default)]
pub struct UserPatchBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl UserPatchBuilder {
    /// Set the first name.
    #[must_use]
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Validate the collected input.
    pub fn build(self) -> Result<UserPatch, UserValidationError> {
        let first_name = self
            .first_name
            .map(|name| required_name(name, UserValidationError::EmptyFirstName))
            .transpose()?;
        let last_name = self
            .last_name
            .map(|name| required_name(name, UserValidationError::EmptyLastName))
            .transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        if first_name.is_none() && last_name.is_none() && email.is_none() {
            return Err(UserValidationError::EmptyPatch);
        }

        Ok(UserPatch {
            first_name,
            last_name,
            email,
        })
    }
}

fn required_name(name: String, error: UserValidationError) -> Result<String, UserValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
