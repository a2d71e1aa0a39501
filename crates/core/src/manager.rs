//! Generic CRUD view controller.
//!
//! One [`EntityManager`] is the whole state of a mounted users or roles view:
//! its store, the active pane, the list query, the shared draft and the delete
//! gate. Every method is one user interaction and completes synchronously.

use serde::Serialize;

use crate::delete_gate::{DeleteGate, GatePhase, GateState};
use crate::entity::Entity;
use crate::error::CoreError;
use crate::filter::filter_records;
use crate::form::{FormController, LookupOutcome, SubmitOutcome};
use crate::pane::Pane;
use crate::store::EntityStore;

#[derive(Debug, Clone)]
pub struct EntityManager<E> {
    store: EntityStore<E>,
    pane: Pane,
    query: String,
    form: FormController<E>,
    gate: DeleteGate<E>,
}

/// One entry of the pane selector.
#[derive(Debug, Clone, Serialize)]
pub struct Tab {
    pub pane: Pane,
    pub label: String,
    pub active: bool,
}

/// Delete pane state as seen by a client.
#[derive(Debug, Clone, Serialize)]
pub struct GateSnapshot<E> {
    pub phase: GatePhase,
    pub lookup: LookupOutcome,
    pub target: Option<E>,
}

/// Serializable state of a view after an interaction.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<E> {
    pub entity: &'static str,
    pub title: String,
    pub key_field: &'static str,
    pub pane: Pane,
    pub tabs: Vec<Tab>,
    pub query: String,
    /// List pane rows after filtering.
    pub records: Vec<E>,
    /// Store size before filtering.
    pub total: usize,
    pub draft: E,
    pub edit_lookup: LookupOutcome,
    pub delete: GateSnapshot<E>,
    pub message: Option<String>,
}

impl<E: Entity> Default for EntityManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityManager<E> {
    /// A view over the entity's seed rows, on the list pane.
    pub fn new() -> Self {
        Self::with_store(EntityStore::seeded())
    }

    pub fn with_store(store: EntityStore<E>) -> Self {
        Self {
            store,
            pane: Pane::List,
            query: String::new(),
            form: FormController::new(),
            gate: DeleteGate::new(),
        }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn form(&self) -> &FormController<E> {
        &self.form
    }

    pub fn gate(&self) -> &DeleteGate<E> {
        &self.gate
    }

    /// Switch panes, discarding the draft and any edit or delete search.
    ///
    /// Selecting the current pane also resets it. The list query survives.
    pub fn select_pane(&mut self, pane: Pane) {
        self.form.reset();
        self.gate.reset();
        self.pane = pane;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rows shown on the list pane.
    pub fn visible_records(&self) -> Vec<E> {
        filter_records(self.store.list(), &self.query)
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        self.require_form()?;
        self.form.set_field(field, value)
    }

    pub fn toggle_member(
        &mut self,
        field: &str,
        value: &str,
        present: bool,
    ) -> Result<(), CoreError> {
        self.require_form()?;
        self.form.toggle_member(field, value, present)
    }

    /// Load a record into the draft by secondary key (edit pane).
    pub fn search_edit(&mut self, key: &str) -> Result<LookupOutcome, CoreError> {
        self.require_pane(Pane::Edit, "search for a record to edit")?;
        Ok(self.form.load_by_key(&self.store, key))
    }

    /// Submit the draft and return to the list pane.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CoreError> {
        self.require_form()?;
        let outcome = self.form.submit(&mut self.store)?;
        self.select_pane(Pane::List);
        Ok(outcome)
    }

    /// Locate a record for deletion by secondary key (delete pane).
    pub fn search_delete(&mut self, key: &str) -> Result<LookupOutcome, CoreError> {
        self.require_pane(Pane::Delete, "search for a record to delete")?;
        Ok(self.gate.search(&self.store, key))
    }

    pub fn request_delete(&mut self) -> Result<(), CoreError> {
        self.require_pane(Pane::Delete, "request deletion")?;
        self.gate.request()
    }

    /// Remove the located record. Returns it with the number of rows removed.
    pub fn confirm_delete(&mut self) -> Result<(E, usize), CoreError> {
        self.require_pane(Pane::Delete, "confirm deletion")?;
        self.gate.confirm(&mut self.store)
    }

    pub fn cancel_delete(&mut self) -> Result<(), CoreError> {
        self.require_pane(Pane::Delete, "cancel deletion")?;
        self.gate.cancel()
    }

    /// User-facing notice for the current pane, if any.
    pub fn message(&self) -> Option<String> {
        let not_found = || format!("{} not found", E::LABEL);
        let delete_prompt = |record: &E| {
            format!(
                "Are you sure you want to delete the {} {}?",
                E::LABEL.to_lowercase(),
                record.display_name()
            )
        };
        match self.pane {
            Pane::Edit if self.form.lookup() == LookupOutcome::NotFound => Some(not_found()),
            Pane::Delete => match self.gate.state() {
                GateState::Located(record) => Some(delete_prompt(record)),
                GateState::Confirming(record) => Some(match E::CONFIRM_WARNING {
                    Some(warning) => format!("{}\n{warning}", delete_prompt(record)),
                    None => delete_prompt(record),
                }),
                GateState::Idle if self.gate.lookup() == LookupOutcome::NotFound => {
                    Some(not_found())
                }
                GateState::Idle => None,
            },
            _ => None,
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<E> {
        let tabs = Pane::ALL
            .into_iter()
            .map(|pane| Tab {
                pane,
                label: pane.tab_label(E::PLURAL_LABEL),
                active: pane == self.pane,
            })
            .collect();

        ViewSnapshot {
            entity: E::COLLECTION,
            title: format!("{} Management", E::LABEL),
            key_field: E::KEY_FIELD,
            pane: self.pane,
            tabs,
            query: self.query.clone(),
            records: self.visible_records(),
            total: self.store.len(),
            draft: self.form.draft().clone(),
            edit_lookup: self.form.lookup(),
            delete: GateSnapshot {
                phase: self.gate.phase(),
                lookup: self.gate.lookup(),
                target: self.gate.target().cloned(),
            },
            message: self.message(),
        }
    }

    fn require_pane(&self, pane: Pane, action: &str) -> Result<(), CoreError> {
        if self.pane == pane {
            Ok(())
        } else {
            Err(CoreError::InvalidState(format!(
                "Cannot {action} on the {} pane",
                self.pane.as_str()
            )))
        }
    }

    /// The draft is editable on the create pane, and on the edit pane once a
    /// record has been loaded.
    fn require_form(&self) -> Result<(), CoreError> {
        match self.pane {
            Pane::Create => Ok(()),
            Pane::Edit if self.form.is_loaded() => Ok(()),
            Pane::Edit => Err(CoreError::InvalidState(format!(
                "No {} loaded for editing",
                E::LABEL.to_lowercase()
            ))),
            other => Err(CoreError::InvalidState(format!(
                "The {} pane has no form",
                other.as_str()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::role::{Role, FIELD_PERMISSIONS};
    use crate::types::RecordId;
    use crate::user::{User, UserRole};
    use assert_matches::assert_matches;

    fn names<E: Entity>(rows: &[E]) -> Vec<String> {
        rows.iter().map(|r| r.display_name().to_string()).collect()
    }

    #[test]
    fn test_new_view_starts_on_list_with_seed() {
        let view = EntityManager::<User>::new();
        assert_eq!(view.pane(), Pane::List);
        assert_eq!(view.query(), "");
        assert_eq!(view.visible_records(), User::seed());
        assert_eq!(view.message(), None);
    }

    #[test]
    fn test_user_scenario() {
        let mut view = EntityManager::<User>::new();

        view.set_query("jane");
        assert_eq!(names(&view.visible_records()), vec!["Jane Smith"]);

        view.select_pane(Pane::Edit);
        assert_eq!(view.search_edit("jane@example.com").unwrap(), LookupOutcome::Found);
        view.set_field("role", "Manager").unwrap();
        view.submit().unwrap();
        assert_eq!(view.pane(), Pane::List);

        let users = view.store().list();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Jane Smith");
        assert_eq!(users[1].role, Some(UserRole::Manager));
        assert_eq!(users[0], User::seed()[0]);

        view.select_pane(Pane::Delete);
        view.search_delete("john@example.com").unwrap();
        view.request_delete().unwrap();
        view.confirm_delete().unwrap();

        let users = view.store().list();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Jane Smith");
    }

    #[test]
    fn test_create_grows_list_by_one_with_unique_id() {
        let mut view = EntityManager::<Role>::new();
        for name in ["Auditor", "Support", "Auditor"] {
            let existing: HashSet<RecordId> =
                view.store().list().iter().filter_map(|r| r.id).collect();
            let before = view.store().len();

            view.select_pane(Pane::Create);
            view.set_field("name", name).unwrap();
            view.toggle_member(FIELD_PERMISSIONS, "Read", true).unwrap();
            let id = assert_matches!(view.submit(), Ok(SubmitOutcome::Created { id }) => id);

            assert_eq!(view.store().len(), before + 1);
            assert!(!existing.contains(&id));
        }
    }

    #[test]
    fn test_submit_returns_to_list_and_clears_draft() {
        let mut view = EntityManager::<Role>::new();
        view.select_pane(Pane::Create);
        view.set_field("name", "Auditor").unwrap();
        view.submit().unwrap();

        assert_eq!(view.pane(), Pane::List);
        assert_eq!(view.form().draft(), &Role::default());
    }

    #[test]
    fn test_failed_create_stays_on_create_pane() {
        let mut view = EntityManager::<User>::new();
        view.select_pane(Pane::Create);
        view.set_field("name", "Incomplete").unwrap();

        assert_matches!(view.submit(), Err(CoreError::Validation(_)));
        assert_eq!(view.pane(), Pane::Create);
        assert_eq!(view.form().draft().name, "Incomplete");
        assert_eq!(view.store().len(), 2);
    }

    #[test]
    fn test_edit_replaces_exactly_one() {
        let mut view = EntityManager::<Role>::new();
        view.select_pane(Pane::Edit);
        view.search_edit("User").unwrap();
        view.set_field("name", "Member").unwrap();

        assert_eq!(
            view.submit().unwrap(),
            SubmitOutcome::Updated { id: 2, replaced: 1 }
        );
        assert_eq!(names(view.store().list()), vec!["Admin", "Member"]);
    }

    #[test]
    fn test_edit_miss_is_reported_not_raised() {
        let mut view = EntityManager::<User>::new();
        view.select_pane(Pane::Edit);

        assert_eq!(view.search_edit("ghost@example.com").unwrap(), LookupOutcome::NotFound);
        assert_eq!(view.message().as_deref(), Some("User not found"));
        assert_matches!(view.set_field("name", "x"), Err(CoreError::InvalidState(_)));
        assert_matches!(view.submit(), Err(CoreError::InvalidState(_)));
    }

    #[test]
    fn test_pane_switch_resets_draft_and_gate_but_keeps_query() {
        let mut view = EntityManager::<User>::new();
        view.set_query("doe");
        view.select_pane(Pane::Create);
        view.set_field("name", "Draft").unwrap();

        view.select_pane(Pane::Delete);
        view.search_delete("john@example.com").unwrap();
        view.request_delete().unwrap();

        view.select_pane(Pane::Create);
        assert_eq!(view.form().draft(), &User::default());
        assert_eq!(view.gate().phase(), GatePhase::Idle);
        assert_eq!(view.query(), "doe");
        assert_eq!(view.store().len(), 2);
    }

    #[test]
    fn test_reselecting_pane_resets_it() {
        let mut view = EntityManager::<User>::new();
        view.select_pane(Pane::Edit);
        view.search_edit("john@example.com").unwrap();
        view.select_pane(Pane::Edit);
        assert!(!view.form().is_loaded());
    }

    #[test]
    fn test_delete_messages_follow_gate() {
        let mut view = EntityManager::<Role>::new();
        view.select_pane(Pane::Delete);
        assert_eq!(view.message(), None);

        view.search_delete("Nobody").unwrap();
        assert_eq!(view.message().as_deref(), Some("Role not found"));

        view.search_delete("Admin").unwrap();
        assert_eq!(
            view.message().as_deref(),
            Some("Are you sure you want to delete the role Admin?")
        );

        view.request_delete().unwrap();
        assert_eq!(
            view.message().as_deref(),
            Some(
                "Are you sure you want to delete the role Admin?\n\
                 Are you sure? This action cannot be undone."
            )
        );

        view.cancel_delete().unwrap();
        assert_eq!(view.message(), None);
        assert_eq!(view.store().len(), 2);
    }

    #[test]
    fn test_user_confirmation_keeps_named_prompt() {
        let mut view = EntityManager::<User>::new();
        view.select_pane(Pane::Delete);
        view.search_delete("john@example.com").unwrap();
        view.request_delete().unwrap();
        assert_eq!(
            view.message().as_deref(),
            Some("Are you sure you want to delete the user John Doe?")
        );
    }

    #[test]
    fn test_actions_outside_their_pane_are_rejected() {
        let mut view = EntityManager::<User>::new();
        assert_matches!(view.search_edit("john@example.com"), Err(CoreError::InvalidState(_)));
        assert_matches!(view.search_delete("john@example.com"), Err(CoreError::InvalidState(_)));
        assert_matches!(view.request_delete(), Err(CoreError::InvalidState(_)));
        assert_matches!(view.confirm_delete(), Err(CoreError::InvalidState(_)));
        assert_matches!(view.cancel_delete(), Err(CoreError::InvalidState(_)));
        assert_matches!(view.set_field("name", "x"), Err(CoreError::InvalidState(_)));
        assert_matches!(view.submit(), Err(CoreError::InvalidState(_)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut view = EntityManager::<User>::new();
        view.set_query("JOHN");
        view.select_pane(Pane::Delete);
        view.search_delete("john@example.com").unwrap();

        let snapshot = view.snapshot();
        assert_eq!(snapshot.entity, "users");
        assert_eq!(snapshot.title, "User Management");
        assert_eq!(snapshot.key_field, "email");
        assert_eq!(snapshot.pane, Pane::Delete);
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.delete.phase, GatePhase::Located);
        assert_eq!(snapshot.delete.target.as_ref().unwrap().name, "John Doe");

        let active: Vec<_> = snapshot.tabs.iter().filter(|t| t.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Delete Users");
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(EntityManager::<Role>::new().snapshot()).unwrap();
        assert_eq!(json["entity"], "roles");
        assert_eq!(json["pane"], "list");
        assert_eq!(json["edit_lookup"], "not_searched");
        assert_eq!(json["delete"]["phase"], "idle");
        assert_eq!(json["records"][1]["permissions"][1], "View");
        assert!(json["draft"]["id"].is_null());
    }
}
