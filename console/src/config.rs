//! Console configuration loaded via OrthoConfig.
//!
//! Every value can come from a `CONSOLE_*` environment variable or a config
//! file; command-line flags are handled separately by the inbound CLI.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::memory::DEFAULT_PER_PAGE;

const DEFAULT_BASE_URL: &str = "https://reqres.in";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CREDENTIAL_DIR: &str = ".admin-console";

/// Settings controlling where the console connects and stores its session.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONSOLE")]
pub struct ConsoleSettings {
    /// Root URL of the directory API.
    pub base_url: Option<String>,
    /// Value sent in the `x-api-key` header, if any.
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Directory holding the persisted session token.
    pub credential_dir: Option<PathBuf>,
    /// Serve an in-memory directory generated from this seed instead of HTTP.
    pub offline_seed: Option<String>,
    /// Registry file to look the offline seed up in.
    pub seed_registry: Option<PathBuf>,
    /// Page size of the in-memory directory.
    pub per_page: Option<usize>,
}

impl ConsoleSettings {
    /// Parse the configured base URL, falling back to the public reqres host.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Request timeout; zero is raised to one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// Credential directory, relative to the working directory by default.
    pub fn credential_dir(&self) -> PathBuf {
        self.credential_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIAL_DIR))
    }

    /// In-memory page size.
    pub fn per_page(&self) -> usize {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1)
    }

    /// API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for console configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "CONSOLE_BASE_URL",
        "CONSOLE_API_KEY",
        "CONSOLE_TIMEOUT_SECS",
        "CONSOLE_CREDENTIAL_DIR",
        "CONSOLE_OFFLINE_SEED",
        "CONSOLE_SEED_REGISTRY",
        "CONSOLE_PER_PAGE",
    ];

    fn load_from_empty_args() -> ConsoleSettings {
        ConsoleSettings::load_from_iter([OsString::from("admin-console")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("default url parses").as_str(),
            "https://reqres.in/"
        );
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.credential_dir(), PathBuf::from(".admin-console"));
        assert_eq!(settings.per_page(), 6);
        assert!(settings.api_key().is_none());
        assert!(settings.offline_seed.is_none());
        assert!(settings.seed_registry.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CONSOLE_BASE_URL", Some("http://127.0.0.1:9000".to_owned())),
            ("CONSOLE_API_KEY", Some("reqres-free-v1".to_owned())),
            ("CONSOLE_TIMEOUT_SECS", Some("3".to_owned())),
            ("CONSOLE_CREDENTIAL_DIR", Some("/tmp/console-creds".to_owned())),
            ("CONSOLE_OFFLINE_SEED", Some("large-office".to_owned())),
            ("CONSOLE_SEED_REGISTRY", Some("/tmp/seeds.json".to_owned())),
            ("CONSOLE_PER_PAGE", Some("10".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("url parses").as_str(),
            "http://127.0.0.1:9000/"
        );
        assert_eq!(settings.api_key(), Some("reqres-free-v1"));
        assert_eq!(settings.timeout(), Duration::from_secs(3));
        assert_eq!(settings.credential_dir(), PathBuf::from("/tmp/console-creds"));
        assert_eq!(settings.offline_seed.as_deref(), Some("large-office"));
        assert_eq!(settings.seed_registry, Some(PathBuf::from("/tmp/seeds.json")));
        assert_eq!(settings.per_page(), 10);
    }

    #[rstest]
    fn degenerate_values_are_clamped() {
        let _guard = lock_env([
            ("CONSOLE_BASE_URL", None::<String>),
            ("CONSOLE_API_KEY", Some("   ".to_owned())),
            ("CONSOLE_TIMEOUT_SECS", Some("0".to_owned())),
            ("CONSOLE_CREDENTIAL_DIR", None),
            ("CONSOLE_OFFLINE_SEED", None),
            ("CONSOLE_SEED_REGISTRY", None),
            ("CONSOLE_PER_PAGE", Some("0".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.api_key().is_none());
        assert_eq!(settings.timeout(), Duration::from_secs(1));
        assert_eq!(settings.per_page(), 1);
    }
}
