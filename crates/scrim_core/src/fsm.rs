//! Minimal state machine support
//!
//! States are small `Copy` enums that map an event to the next state. A
//! `None` answer means the event is not accepted in the current state and the
//! caller should leave everything untouched.

use std::fmt::Debug;
use std::hash::Hash;

/// Transition table for a state enum
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Events understood by this machine
    type Event: Copy + Debug;

    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: Self::Event) -> Option<Self>;
}

/// Apply `event` to `state` in place
///
/// Returns true if the machine accepted the event.
pub fn transition<S: StateTransitions>(state: &mut S, event: S::Event) -> bool {
    match state.on_event(event) {
        Some(next) => {
            tracing::trace!(from = ?*state, to = ?next, ?event, "state transition");
            *state = next;
            true
        }
        None => false,
    }
}
