use serde::{Deserialize, Serialize};

/// The logged in Discord user as returned by `/api/auth/user`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserDto {
    pub discord_id: String,
    pub name: String,
}
