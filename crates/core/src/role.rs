//! Role records managed by the roles view.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{contains_ignore_case, unknown_field, Entity};
use crate::error::CoreError;
use crate::types::RecordId;

pub const PERMISSION_READ: &str = "Read";
pub const PERMISSION_WRITE: &str = "Write";
pub const PERMISSION_DELETE: &str = "Delete";
pub const PERMISSION_UPDATE: &str = "Update";

/// Permissions the form offers as checkboxes.
pub const AVAILABLE_PERMISSIONS: &[&str] = &[
    PERMISSION_READ,
    PERMISSION_WRITE,
    PERMISSION_DELETE,
    PERMISSION_UPDATE,
];

/// Present in the seed data but not offered by the form. Stored values are
/// never checked against [`AVAILABLE_PERMISSIONS`].
pub const LEGACY_PERMISSION_VIEW: &str = "View";

/// Shown under the delete prompt once a role deletion is requested.
pub const CONFIRM_PROMPT: &str = "Are you sure? This action cannot be undone.";

/// Name of the multi-valued permissions field.
pub const FIELD_PERMISSIONS: &str = "permissions";

/// Returns `true` if the permission is one the form offers.
pub fn is_available_permission(permission: &str) -> bool {
    AVAILABLE_PERMISSIONS.contains(&permission)
}

/// A role row, also used as the create/edit draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Role {
    pub id: Option<RecordId>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Insertion-ordered, without duplicates.
    pub permissions: Vec<String>,
}

impl Entity for Role {
    const LABEL: &'static str = "Role";
    const PLURAL_LABEL: &'static str = "Roles";
    const COLLECTION: &'static str = "roles";
    const KEY_FIELD: &'static str = "name";
    const CONFIRM_WARNING: Option<&'static str> = Some(CONFIRM_PROMPT);

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn secondary_key(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle)
            || self
                .permissions
                .iter()
                .any(|permission| contains_ignore_case(permission, needle))
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        match field {
            "name" => {
                self.name = value.to_string();
                Ok(())
            }
            FIELD_PERMISSIONS => Err(CoreError::Validation(
                "permissions are changed one at a time via toggle_member".to_string(),
            )),
            other => Err(unknown_field::<Self>(other)),
        }
    }

    fn toggle_member(&mut self, field: &str, value: &str, present: bool) -> Result<(), CoreError> {
        if field != FIELD_PERMISSIONS {
            return Err(unknown_field::<Self>(field));
        }

        if present {
            if !self.permissions.iter().any(|p| p == value) {
                self.permissions.push(value.to_string());
            }
        } else {
            self.permissions.retain(|p| p != value);
        }
        Ok(())
    }

    fn validate_new(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }

    fn seed() -> Vec<Self> {
        vec![
            Role {
                id: Some(1),
                name: "Admin".to_string(),
                permissions: AVAILABLE_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            },
            Role {
                id: Some(2),
                name: "User".to_string(),
                permissions: vec![
                    PERMISSION_READ.to_string(),
                    LEGACY_PERMISSION_VIEW.to_string(),
                ],
            },
        ]
    }
}
