//! Generated user seed types.
//!
//! These types mirror the remote directory's user record shape without
//! depending on the console crate.

use serde::{Deserialize, Serialize};

/// A generated example directory user.
///
/// Field names follow the remote API's `snake_case` wire format so a seed can
/// be served or compared verbatim.
///
/// # Example
///
/// ```
/// use example_data::ExampleUserSeed;
///
/// let user = ExampleUserSeed {
///     id: 7,
///     first_name: "Michael".to_owned(),
///     last_name: "Lawson".to_owned(),
///     email: "michael.lawson@example.test".to_owned(),
///     avatar: "https://reqres.in/img/faces/7-image.jpg".to_owned(),
/// };
///
/// assert_eq!(user.first_name, "Michael");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleUserSeed {
    /// Sequential identifier starting at 1.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_user_seed_serializes_to_snake_case() {
        let user = ExampleUserSeed {
            id: 1,
            first_name: "George".to_owned(),
            last_name: "Bluth".to_owned(),
            email: "george.bluth@example.test".to_owned(),
            avatar: "https://reqres.in/img/faces/1-image.jpg".to_owned(),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("first_name"));
        assert!(json.contains("last_name"));
        assert!(json.contains("\"id\":1"));
    }
}
