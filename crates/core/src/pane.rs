//! The four mutually exclusive panes of an entity view.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    #[default]
    List,
    Create,
    Edit,
    Delete,
}

impl Pane {
    /// Panes in tab order.
    pub const ALL: [Pane; 4] = [Self::List, Self::Create, Self::Edit, Self::Delete];

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|pane| pane.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid pane '{s}'. Must be one of: list, create, edit, delete"
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Tab caption, e.g. `"Create Users"`.
    pub fn tab_label(self, plural_label: &str) -> String {
        let verb = match self {
            Self::List => "List",
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        };
        format!("{verb} {plural_label}")
    }
}
