//! Deterministic user generation from seed definitions.
//!
//! The same seed value always produces identical output.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::ExampleUserSeed;
use crate::validation::{EMAIL_DOMAIN, email_local_part, is_valid_email_local_part};

/// Maximum number of attempts to generate a usable email address.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Upper bound on generated users per seed.
const MAX_USERS: usize = 10_000;

/// Generates example users from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG, ensuring
/// identical output for the same seed definition. The generated users have:
///
/// - Sequential ids starting at 1, like a freshly provisioned directory
/// - English first and last names
/// - Emails of the form `first.last@example.test`, suffixed with the id when
///   an address would repeat
/// - reqres-style avatar URLs
///
/// # Errors
///
/// Returns [`GenerationError`] if the seed asks for more than the supported
/// number of users or a usable email cannot be produced.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_users};
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "userCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let users = generate_example_users(seed_def).expect("generated");
///
/// assert_eq!(users.len(), 3);
/// let users2 = generate_example_users(seed_def).expect("generated");
/// assert_eq!(users, users2);
/// ```
pub fn generate_example_users(
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    if seed_def.user_count() > MAX_USERS {
        return Err(GenerationError::TooManyUsers {
            requested: seed_def.user_count(),
            limit: MAX_USERS,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut users: Vec<ExampleUserSeed> = Vec::with_capacity(seed_def.user_count());

    for id in (1_u64..).take(seed_def.user_count()) {
        let (first_name, last_name, local) = generate_names(&mut rng)?;
        let mut email = format!("{local}@{EMAIL_DOMAIN}");
        if users.iter().any(|u| u.email == email) {
            email = format!("{local}{id}@{EMAIL_DOMAIN}");
        }
        users.push(ExampleUserSeed {
            id,
            first_name,
            last_name,
            email,
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        });
    }

    Ok(users)
}

/// Draws a name pair whose derived email local part is valid.
fn generate_names(rng: &mut ChaCha8Rng) -> Result<(String, String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let local = email_local_part(&first, &last);
        if is_valid_email_local_part(&local) {
            return Ok((first, last, local));
        }
    }

    Err(GenerationError::EmailExhausted {
        attempts: MAX_NAME_ATTEMPTS,
    })
}
