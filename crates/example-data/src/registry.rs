//! Named seeds loaded from a versioned JSON document.
//!
//! Document shape:
//!
//! ```json
//! { "version": 1, "seeds": [{ "name": "reqres-classic", "seed": 2026, "userCount": 12 }] }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

const SUPPORTED_VERSION: u32 = 1;

/// Registry bundled with the crate for offline demonstrations.
///
/// `reqres-classic` mirrors the public reqres directory: twelve users served
/// six per page.
pub const BUILTIN_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "seeds": [
        {"name": "reqres-classic", "seed": 2026, "userCount": 12},
        {"name": "large-office", "seed": 4242, "userCount": 60}
    ]
}"#;

#[derive(Deserialize)]
struct Document {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

/// Validated set of named seeds.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let registry = SeedRegistry::builtin().expect("bundled registry parses");
/// let classic = registry.find_seed("reqres-classic").expect("bundled seed");
/// assert_eq!(classic.user_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parse and validate a registry document.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Malformed`] for undecodable JSON,
    /// [`RegistryError::Version`] for an unknown format version,
    /// [`RegistryError::NoSeeds`] and [`RegistryError::DuplicateName`] for
    /// seed lists that cannot be looked up unambiguously.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let document: Document =
            serde_json::from_str(json).map_err(|error| RegistryError::Malformed {
                message: error.to_string(),
            })?;
        Self::validated(document)
    }

    /// The registry bundled as [`BUILTIN_REGISTRY_JSON`].
    ///
    /// # Errors
    ///
    /// Only if the bundled document stops validating.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY_JSON)
    }

    /// Read and validate a registry file.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unreadable`] when the file cannot be read, otherwise
    /// as [`SeedRegistry::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|error| RegistryError::Unreadable {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        Self::from_json(&json)
    }

    fn validated(Document { version, seeds }: Document) -> Result<Self, RegistryError> {
        if version != SUPPORTED_VERSION {
            return Err(RegistryError::Version {
                found: version,
                supported: SUPPORTED_VERSION,
            });
        }
        if seeds.is_empty() {
            return Err(RegistryError::NoSeeds);
        }
        let repeated = {
            let mut seen = BTreeSet::new();
            seeds
                .iter()
                .find(|seed| !seen.insert(seed.name.as_str()))
                .map(|seed| seed.name.clone())
        };
        if let Some(name) = repeated {
            return Err(RegistryError::DuplicateName { name });
        }
        Ok(Self { version, seeds })
    }

    /// Format version of the document.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Seeds in document order.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Look a seed up by exact name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownSeed`], listing the names that do exist.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|seed| seed.name == name)
            .ok_or_else(|| RegistryError::UnknownSeed {
                name: name.to_owned(),
                known: self
                    .seeds
                    .iter()
                    .map(SeedDefinition::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// One named seed: RNG seed plus how many users to draw from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    user_count: usize,
}

impl SeedDefinition {
    /// Name used for lookups.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RNG seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Users to generate.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.user_count
    }
}
