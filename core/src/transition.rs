//! Explicit status state machines.
//!
//! RULE: a record's status only moves along an edge its machine declares.
//! Re-applying the current status is accepted and changes nothing.

use crate::error::{PanelError, PanelResult};
use std::fmt::Display;

pub trait StatusMachine: Copy + PartialEq + Display {
    /// Entity name used in error messages and log lines.
    const ENTITY: &'static str;

    /// True when `self -> next` is a declared edge.
    fn can_transition_to(&self, next: Self) -> bool;
}

/// Check a requested transition for record `id`.
///
/// Returns `Ok(true)` when the status must change, `Ok(false)` when it is
/// already `to`, and `IllegalTransition` otherwise.
pub fn check_transition<S: StatusMachine>(id: &str, from: S, to: S) -> PanelResult<bool> {
    if from == to {
        return Ok(false);
    }
    if from.can_transition_to(to) {
        Ok(true)
    } else {
        Err(PanelError::IllegalTransition {
            entity: S::ENTITY,
            id:     id.to_string(),
            from:   from.to_string(),
            to:     to.to_string(),
        })
    }
}
