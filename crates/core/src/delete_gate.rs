//! Two-step guard in front of record removal.
//!
//! ```text
//! Idle --search hit--> Located --request--> Confirming --confirm--> Idle (removed)
//!                                                      \--cancel---> Idle (kept)
//! ```
//!
//! A search miss leaves the gate `Idle` with a `NotFound` outcome. A search is
//! accepted in every state and restarts the gate.

use serde::Serialize;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::form::LookupOutcome;
use crate::store::EntityStore;

/// Gate state, carrying the located record once a search hits.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GateState<E> {
    #[default]
    Idle,
    Located(E),
    Confirming(E),
}

/// Serializable name of a [`GateState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    Idle,
    Located,
    Confirming,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteGate<E> {
    state: GateState<E>,
    lookup: LookupOutcome,
}

impl<E: Entity> DeleteGate<E> {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
            lookup: LookupOutcome::NotSearched,
        }
    }

    pub fn state(&self) -> &GateState<E> {
        &self.state
    }

    pub fn phase(&self) -> GatePhase {
        match self.state {
            GateState::Idle => GatePhase::Idle,
            GateState::Located(_) => GatePhase::Located,
            GateState::Confirming(_) => GatePhase::Confirming,
        }
    }

    pub fn lookup(&self) -> LookupOutcome {
        self.lookup
    }

    /// The record awaiting deletion, if any.
    pub fn target(&self) -> Option<&E> {
        match &self.state {
            GateState::Idle => None,
            GateState::Located(record) | GateState::Confirming(record) => Some(record),
        }
    }

    /// Locate the record whose secondary key is `key`.
    pub fn search(&mut self, store: &EntityStore<E>, key: &str) -> LookupOutcome {
        match store.find_by_key(key) {
            Some(record) => {
                self.state = GateState::Located(record.clone());
                self.lookup = LookupOutcome::Found;
            }
            None => {
                self.state = GateState::Idle;
                self.lookup = LookupOutcome::NotFound;
            }
        }
        self.lookup
    }

    /// `Located -> Confirming`.
    pub fn request(&mut self) -> Result<(), CoreError> {
        match std::mem::take(&mut self.state) {
            GateState::Located(record) => {
                self.state = GateState::Confirming(record);
                Ok(())
            }
            other => {
                let err = self.invalid("request deletion", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    /// `Confirming -> Idle`, removing every record with the located key.
    ///
    /// Returns the removed record and how many rows went with it.
    pub fn confirm(&mut self, store: &mut EntityStore<E>) -> Result<(E, usize), CoreError> {
        match std::mem::take(&mut self.state) {
            GateState::Confirming(record) => {
                let removed = store.remove(|r| r.secondary_key() == record.secondary_key());
                self.lookup = LookupOutcome::NotSearched;
                Ok((record, removed))
            }
            other => {
                let err = self.invalid("confirm deletion", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    /// `Confirming -> Idle` without touching the store.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        match std::mem::take(&mut self.state) {
            GateState::Confirming(_) => {
                self.lookup = LookupOutcome::NotSearched;
                Ok(())
            }
            other => {
                let err = self.invalid("cancel deletion", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = GateState::Idle;
        self.lookup = LookupOutcome::NotSearched;
    }

    fn invalid(&self, action: &str, state: &GateState<E>) -> CoreError {
        let phase = match state {
            GateState::Idle => "idle",
            GateState::Located(_) => "located",
            GateState::Confirming(_) => "confirming",
        };
        CoreError::InvalidState(format!("Cannot {action} while the delete gate is {phase}"))
    }
}
