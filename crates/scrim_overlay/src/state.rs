//! Overlay lifecycle state machine
//!
//! Closing is two-phase: `close()` makes the overlay logically closed
//! (`Hiding`) while the exit animation plays; only `ExitComplete` makes it
//! `Hidden` and lets the content be removed.

use scrim_core::StateTransitions;

/// Events driving [`OverlayPhase`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    /// `show()` was called
    Show,
    /// `close()` was called, or the user dismissed the overlay
    Close,
    /// Enter animation finished
    EnterComplete,
    /// Exit animation finished
    ExitComplete,
}

/// State machine for overlay lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OverlayPhase {
    /// Nothing mounted
    #[default]
    Hidden,
    /// Enter animation is playing
    Showing,
    /// Fully visible and interactive
    Visible,
    /// Exit animation is playing; logically closed, still mounted
    Hiding,
}

impl OverlayPhase {
    /// Logical visibility: true between `show()` and `close()`
    pub fn is_visible(&self) -> bool {
        matches!(self, OverlayPhase::Showing | OverlayPhase::Visible)
    }

    /// Check if content should be in the render tree
    pub fn is_mounted(&self) -> bool {
        !matches!(self, OverlayPhase::Hidden)
    }
}

impl StateTransitions for OverlayPhase {
    type Event = OverlayEvent;

    fn on_event(&self, event: OverlayEvent) -> Option<Self> {
        use OverlayEvent::*;
        use OverlayPhase::*;

        match (self, event) {
            // Hidden -> Showing: mount and start enter animation
            (Hidden, Show) => Some(Showing),

            // Replacing the config keeps the current phase
            (Showing, Show) => Some(Showing),
            (Visible, Show) => Some(Visible),

            // Interrupt the exit animation and head back in
            (Hiding, Show) => Some(Showing),

            (Showing, EnterComplete) => Some(Visible),

            (Showing, Close) | (Visible, Close) => Some(Hiding),

            // Exit animation finished, remove content
            (Hiding, ExitComplete) => Some(Hidden),

            _ => None,
        }
    }
}
