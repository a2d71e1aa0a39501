//! The schema contract the generic view controller is parameterized by.
//!
//! An [`Entity`] is both the stored record and the draft edited by the form:
//! a blank draft is `Default::default()` with no identifier.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::RecordId;

/// A record type managed by an [`EntityManager`](crate::manager::EntityManager).
pub trait Entity: Clone + Default + std::fmt::Debug + Serialize + Send + Sync + 'static {
    /// Singular label used in user-facing messages (e.g. `"User"`).
    const LABEL: &'static str;

    /// Plural label used for tab captions (e.g. `"Users"`).
    const PLURAL_LABEL: &'static str;

    /// Route segment for the view (e.g. `"users"`).
    const COLLECTION: &'static str;

    /// Name of the field used to locate a record for edit and delete.
    const KEY_FIELD: &'static str;

    /// Extra line appended to the delete prompt once deletion is requested.
    const CONFIRM_WARNING: Option<&'static str> = None;

    /// Identifier, absent on a draft that has never been stored.
    fn id(&self) -> Option<RecordId>;

    /// Return the record with its identifier set to `id`.
    fn with_id(self, id: RecordId) -> Self;

    /// Value of the secondary key field.
    fn secondary_key(&self) -> &str;

    /// Name shown in the delete confirmation prompt.
    fn display_name(&self) -> &str;

    /// Whether any filterable field contains `needle`.
    ///
    /// `needle` is already lowercased and non-empty.
    fn matches(&self, needle: &str) -> bool;

    /// Update a scalar field from its textual form input.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError>;

    /// Add (`present = true`) or remove a value of a multi-valued field.
    fn toggle_member(&mut self, field: &str, value: &str, present: bool) -> Result<(), CoreError> {
        let _ = (value, present);
        Err(unknown_field::<Self>(field))
    }

    /// Input-level checks applied when a new record is submitted.
    fn validate_new(&self) -> Result<(), CoreError>;

    /// Fixed rows every freshly mounted view starts with.
    fn seed() -> Vec<Self>;
}

/// Error for a field name the entity's form does not have.
pub fn unknown_field<E: Entity>(field: &str) -> CoreError {
    CoreError::Validation(format!("{} has no editable field '{field}'", E::LABEL))
}

/// Case-insensitive containment; `needle_lower` must already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
