//! DTOs for the directory and login JSON payloads.
//!
//! The adapters decode into these transport DTOs first, then map into domain
//! records in one pass. Unknown fields (`page`, `per_page`, `support`, ...)
//! are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserRecord};

#[derive(Debug, Deserialize)]
pub(super) struct UserPageDto {
    pub(super) data: Vec<UserDto>,
    pub(super) total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct SingleUserDto {
    pub(super) data: UserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: u64,
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) avatar: String,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<UserRecord, String> {
        let id = UserId::new(self.id).map_err(|error| format!("user {}: {error}", self.id))?;
        Ok(UserRecord::new(
            id,
            self.first_name,
            self.last_name,
            self.email,
            self.avatar,
        ))
    }
}

impl UserPageDto {
    pub(super) fn into_domain(self) -> Result<(Vec<UserRecord>, u32), String> {
        let records = self
            .data
            .into_iter()
            .map(UserDto::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((records, self.total_pages))
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginResponseDto {
    #[serde(default)]
    pub(super) token: Option<String>,
    #[serde(default)]
    pub(super) error: Option<String>,
}
