//! Reproducible directory users for offline runs and tests.
//!
//! A JSON seed registry names RNG seeds; each seed expands into the same list
//! of users every time, shaped like records of a reqres-style directory.
//! Nothing here depends on the console's domain types, so consumers convert
//! [`ExampleUserSeed`] values wherever they need them.
//!
//! ```
//! use example_data::{EMAIL_DOMAIN, SeedRegistry, generate_example_users};
//!
//! let registry = SeedRegistry::from_json(
//!     r#"{"version": 1, "seeds": [{"name": "trio", "seed": 7, "userCount": 3}]}"#,
//! )
//! .expect("valid registry");
//! let users = generate_example_users(registry.find_seed("trio").expect("trio"))
//!     .expect("users");
//!
//! assert_eq!(users.iter().map(|user| user.id).collect::<Vec<_>>(), [1, 2, 3]);
//! assert!(users.iter().all(|user| user.email.ends_with(EMAIL_DOMAIN)));
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_users;
pub use registry::{BUILTIN_REGISTRY_JSON, SeedDefinition, SeedRegistry};
pub use seed::ExampleUserSeed;
pub use validation::{EMAIL_DOMAIN, is_valid_email_local_part};
