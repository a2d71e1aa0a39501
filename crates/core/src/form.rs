//! The single draft shared by the create and edit panes.

use serde::Serialize;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::store::EntityStore;
use crate::types::RecordId;

/// Result of the most recent search by secondary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    #[default]
    NotSearched,
    Found,
    NotFound,
}

/// What a submit did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: RecordId },
    Updated { id: RecordId, replaced: usize },
}

/// Holds the draft record and the edit-search outcome.
#[derive(Debug, Clone, Default)]
pub struct FormController<E> {
    draft: E,
    lookup: LookupOutcome,
}

impl<E: Entity> FormController<E> {
    pub fn new() -> Self {
        Self {
            draft: E::default(),
            lookup: LookupOutcome::NotSearched,
        }
    }

    pub fn draft(&self) -> &E {
        &self.draft
    }

    pub fn lookup(&self) -> LookupOutcome {
        self.lookup
    }

    /// Whether the draft is a stored record loaded for editing.
    pub fn is_loaded(&self) -> bool {
        self.draft.id().is_some()
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        self.draft.set_field(field, value)
    }

    pub fn toggle_member(
        &mut self,
        field: &str,
        value: &str,
        present: bool,
    ) -> Result<(), CoreError> {
        self.draft.toggle_member(field, value, present)
    }

    /// Load the record whose secondary key is `key` into the draft.
    ///
    /// On a miss the draft is reset to blank. A miss is an outcome, not an error.
    pub fn load_by_key(&mut self, store: &EntityStore<E>, key: &str) -> LookupOutcome {
        match store.find_by_key(key) {
            Some(record) => {
                self.draft = record.clone();
                self.lookup = LookupOutcome::Found;
            }
            None => {
                self.draft = E::default();
                self.lookup = LookupOutcome::NotFound;
            }
        }
        self.lookup
    }

    /// Write the draft to the store and clear the form.
    ///
    /// A draft with an identifier replaces the stored record; one without is
    /// appended under a new identifier after the create-form checks pass. A
    /// failed check leaves both the draft and the store untouched.
    pub fn submit(&mut self, store: &mut EntityStore<E>) -> Result<SubmitOutcome, CoreError> {
        let outcome = match self.draft.id() {
            Some(id) => {
                let replaced = store.replace(id, self.draft.clone());
                SubmitOutcome::Updated { id, replaced }
            }
            None => {
                self.draft.validate_new()?;
                let id = store.add(self.draft.clone());
                SubmitOutcome::Created { id }
            }
        };
        self.reset();
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.draft = E::default();
        self.lookup = LookupOutcome::NotSearched;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{Role, FIELD_PERMISSIONS};
    use crate::user::{User, UserRole};
    use assert_matches::assert_matches;

    fn fill_new_user(form: &mut FormController<User>) {
        form.set_field("name", "Ada Lovelace").unwrap();
        form.set_field("email", "ada@example.com").unwrap();
        form.set_field("role", "Editor").unwrap();
        form.set_field("status", "Pending").unwrap();
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = FormController::<User>::new();
        assert_eq!(form.draft(), &User::default());
        assert!(!form.is_loaded());
        assert_eq!(form.lookup(), LookupOutcome::NotSearched);
    }

    #[test]
    fn test_submit_new_appends_and_clears() {
        let mut store = EntityStore::<User>::seeded();
        let mut form = FormController::new();
        fill_new_user(&mut form);

        let outcome = form.submit(&mut store).unwrap();
        let id = assert_matches!(outcome, SubmitOutcome::Created { id } => id);

        assert_eq!(store.len(), 3);
        let added = store.list().last().unwrap();
        assert_eq!(added.id, Some(id));
        assert_eq!(added.name, "Ada Lovelace");
        assert_eq!(form.draft(), &User::default());
    }

    #[test]
    fn test_submit_new_accepts_duplicate_email() {
        let mut store = EntityStore::<User>::seeded();
        let mut form = FormController::new();
        fill_new_user(&mut form);
        form.set_field("email", "john@example.com").unwrap();

        form.submit(&mut store).unwrap();
        assert_eq!(
            store.list().iter().filter(|u| u.email == "john@example.com").count(),
            2
        );
    }

    #[test]
    fn test_incomplete_new_draft_is_blocked() {
        let mut store = EntityStore::<User>::seeded();
        let mut form = FormController::new();
        form.set_field("name", "No Email").unwrap();

        assert_matches!(form.submit(&mut store), Err(CoreError::Validation(_)));
        assert_eq!(store.len(), 2);
        assert_eq!(form.draft().name, "No Email");
    }

    #[test]
    fn test_load_and_submit_edit() {
        let mut store = EntityStore::<User>::seeded();
        let mut form = FormController::new();

        assert_eq!(form.load_by_key(&store, "jane@example.com"), LookupOutcome::Found);
        assert!(form.is_loaded());
        form.set_field("role", "Manager").unwrap();

        let outcome = form.submit(&mut store).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { id: 2, replaced: 1 });
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].role, Some(UserRole::Manager));
        assert_eq!(store.list()[0], User::seed()[0]);
    }

    #[test]
    fn test_edit_skips_create_checks() {
        let mut store = EntityStore::<User>::seeded();
        let mut form = FormController::new();
        form.load_by_key(&store, "john@example.com");
        form.set_field("email", "").unwrap();

        assert!(form.submit(&mut store).is_ok());
        assert_eq!(store.list()[0].email, "");
    }

    #[test]
    fn test_load_miss_resets_draft() {
        let store = EntityStore::<User>::seeded();
        let mut form = FormController::new();
        form.load_by_key(&store, "jane@example.com");

        assert_eq!(form.load_by_key(&store, "ghost@example.com"), LookupOutcome::NotFound);
        assert_eq!(form.draft(), &User::default());
        assert!(!form.is_loaded());
    }

    #[test]
    fn test_toggle_permissions_on_role_draft() {
        let mut store = EntityStore::<Role>::seeded();
        let mut form = FormController::new();
        form.load_by_key(&store, "User");
        form.toggle_member(FIELD_PERMISSIONS, "Write", true).unwrap();
        form.toggle_member(FIELD_PERMISSIONS, "View", false).unwrap();
        form.submit(&mut store).unwrap();

        assert_eq!(store.list()[1].permissions, vec!["Read", "Write"]);
    }

    #[test]
    fn test_edit_of_removed_record_replaces_nothing() {
        let mut store = EntityStore::<Role>::seeded();
        let mut form = FormController::new();
        form.load_by_key(&store, "Admin");
        store.remove(|r| r.name == "Admin");

        let outcome = form.submit(&mut store).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { id: 1, replaced: 0 });
        assert_eq!(store.len(), 1);
    }
}
