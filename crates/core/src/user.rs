//! User records managed by the users view.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{contains_ignore_case, unknown_field, Entity};
use crate::error::CoreError;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role a user can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    User,
    Manager,
    Editor,
    Viewer,
}

impl UserRole {
    /// All roles in the order the form offers them.
    pub const ALL: [UserRole; 5] = [
        Self::Admin,
        Self::User,
        Self::Manager,
        Self::Editor,
        Self::Viewer,
    ];

    /// Parse a role from its form value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{s}'. Must be one of: Admin, User, Manager, Editor, Viewer"
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
            Self::Manager => "Manager",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [Self::Active, Self::Inactive, Self::Pending];

    /// Parse a status from its form value.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: Active, Inactive, Pending"
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A user row, also used as the create/edit draft.
///
/// `role` and `status` are `None` while the form still shows the blank
/// "Select ..." choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Option<RecordId>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(required(message = "role is required"))]
    pub role: Option<UserRole>,
    #[validate(required(message = "status is required"))]
    pub status: Option<UserStatus>,
}

impl Entity for User {
    const LABEL: &'static str = "User";
    const PLURAL_LABEL: &'static str = "Users";
    const COLLECTION: &'static str = "users";
    const KEY_FIELD: &'static str = "email";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn secondary_key(&self) -> &str {
        &self.email
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle) || contains_ignore_case(&self.email, needle)
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "role" => {
                self.role = match value {
                    "" => None,
                    v => Some(UserRole::parse(v)?),
                }
            }
            "status" => {
                self.status = match value {
                    "" => None,
                    v => Some(UserStatus::parse(v)?),
                }
            }
            other => return Err(unknown_field::<Self>(other)),
        }
        Ok(())
    }

    fn validate_new(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }

    fn seed() -> Vec<Self> {
        vec![
            User {
                id: Some(1),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                role: Some(UserRole::Admin),
                status: Some(UserStatus::Active),
            },
            User {
                id: Some(2),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                role: Some(UserRole::User),
                status: Some(UserStatus::Inactive),
            },
        ]
    }
}
