//! Failures raised while loading seed registries and generating users.

use std::path::PathBuf;

use thiserror::Error;

/// A seed registry could not be loaded or queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read from disk.
    #[error("cannot read seed registry {}: {message}", path.display())]
    Unreadable {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        message: String,
    },

    /// The document is not JSON of the expected shape.
    #[error("seed registry is malformed: {message}")]
    Malformed {
        /// Decoder diagnostic.
        message: String,
    },

    /// The document declares a format version this crate cannot read.
    #[error("seed registry version {found} is not supported (expected {supported})")]
    Version {
        /// Version declared by the document.
        found: u32,
        /// Version this crate reads.
        supported: u32,
    },

    /// The document declares no seeds at all.
    #[error("seed registry defines no seeds")]
    NoSeeds,

    /// Two seeds share a name, so lookups would be ambiguous.
    #[error("seed name '{name}' appears more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Lookup by name found nothing.
    #[error("no seed named '{name}' (known: {known})")]
    UnknownSeed {
        /// Requested name.
        name: String,
        /// Comma-separated names the registry does define.
        known: String,
    },
}

/// Users could not be generated from a seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Every drawn name produced an unusable email local part.
    #[error("no usable email address after {attempts} name draws")]
    EmailExhausted {
        /// Draws attempted.
        attempts: usize,
    },

    /// The seed asks for more users than the generator will produce.
    #[error("seed asks for {requested} users; the limit is {limit}")]
    TooManyUsers {
        /// Requested user count.
        requested: usize,
        /// Generator limit.
        limit: usize,
    },
}
