//! Account DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Account, Role};

/// Account API representation. The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: String,
    pub username: String,
    pub email: String,
    /// `normal`, `admin` or `superadmin`
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            role: a.role.as_str().to_string(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Create account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Role discriminator: `"superAdmin"`, `"admin"`, any other value
    /// (string or not) or no value at all creates a normal account
    #[serde(rename = "type", default)]
    #[schema(value_type = Option<String>)]
    pub kind: Option<serde_json::Value>,
}

impl CreateUserRequest {
    pub fn role(&self) -> Role {
        Role::from_discriminator(self.kind.as_ref().and_then(|v| v.as_str()))
    }
}

/// Delete account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,
}

/// Password update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}
