// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared editing cursor.
//!
//! One [`Selection`] exists per server and is shared by every client:
//! concurrent select/deselect/update calls race and the last writer wins.
//! Each transition returns the state it replaced.

use std::sync::{Arc, PoisonError, RwLock};

use kennel_core::DogId;
use tracing::debug;

/// Which record, if any, is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Deselected,
    Selected(DogId),
}

impl SelectionState {
    /// The selected id, if any.
    pub fn id(self) -> Option<DogId> {
        match self {
            Self::Deselected => None,
            Self::Selected(id) => Some(id),
        }
    }
}

/// Lock-protected [`SelectionState`], cheap to clone into handler state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    inner: Arc<RwLock<SelectionState>>,
}

impl Selection {
    /// A new cursor in the `Deselected` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn current(&self) -> SelectionState {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Currently selected id, if any.
    pub fn selected_id(&self) -> Option<DogId> {
        self.current().id()
    }

    /// Any state -> `Selected(id)`.
    pub fn select(&self, id: DogId) -> SelectionState {
        self.transition(SelectionState::Selected(id))
    }

    /// Any state -> `Deselected`.
    pub fn deselect(&self) -> SelectionState {
        self.transition(SelectionState::Deselected)
    }

    /// A save of `id` ends the editing session.
    ///
    /// The cursor is cleared even if another client moved it elsewhere in
    /// the meantime.
    pub fn complete_update(&self, id: DogId) -> SelectionState {
        let previous = self.transition(SelectionState::Deselected);
        if previous != SelectionState::Selected(id) {
            debug!(saved = %id, ?previous, "update completed for a record that was not selected");
        }
        previous
    }

    fn transition(&self, next: SelectionState) -> SelectionState {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        debug!(from = ?previous, to = ?next, "selection changed");
        previous
    }
}
