//! Scrim Overlay
//!
//! A single-slot modal overlay: a dimmed backdrop with a centered panel,
//! rendered into an external mount point and animated in and out by a spring.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! use scrim_overlay::prelude::*;
//!
//! let closed = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&closed);
//!
//! let overlay = OverlayController::new();
//! overlay.show(
//!     OverlayConfig::error("Failed", "Could not save").on_close(move || {
//!         flag.store(true, Ordering::SeqCst);
//!     }),
//! );
//! assert!(overlay.is_visible());
//!
//! // A click on the backdrop dismisses closable overlays
//! assert!(overlay.handle_backdrop_click());
//! assert!(closed.load(Ordering::SeqCst));
//! assert_eq!(overlay.phase(), OverlayPhase::Hiding);
//! ```

mod config;
mod controller;
mod settings;
mod state;
mod view;


pub use config::{AlertKind, OnCloseCallback, OverlayConfig};
pub use controller::{
    DismissSource, OverlayController, OverlayService, OverlaySnapshot, RenderOutcome,
};
pub use settings::{IconSet, OverlaySettings, SettingsError};
pub use state::{OverlayEvent, OverlayPhase};
pub use view::{BackdropView, CloseButton, OverlayView, PanelView};

// Re-export what hosts need to drive a controller
pub use scrim_animation::{
    InstantTransition, Pose, SpringConfig, SpringTransition, TransitionVariants,
};
pub use scrim_core::{Host, MemoryHost, MountId, MountLookup, PortalError, SubscriptionId};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::{AlertKind, OverlayConfig};
    pub use crate::controller::{OverlayController, OverlayService, RenderOutcome};
    pub use crate::settings::OverlaySettings;
    pub use crate::state::OverlayPhase;
    pub use crate::view::OverlayView;

    pub use scrim_core::{Host, MemoryHost};
}
