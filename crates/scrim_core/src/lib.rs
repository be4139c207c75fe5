//! Scrim Core
//!
//! Foundational pieces for rendering overlays outside the normal component tree:
//!
//! - **Host**: what the overlay core needs from a render environment
//! - **Portal**: resolving an external mount point once the host is ready
//! - **State Machines**: a small transition-table trait
//! - **Notification**: subscriber lists and dirty flags for redraws
//!
//! # Example
//!
//! ```rust
//! use scrim_core::{MemoryHost, PortalResolver, Resolution};
//!
//! let mut host: MemoryHost<String> = MemoryHost::new();
//! let root = host.add_mount("modal-root");
//! host.signal_ready();
//!
//! let mut portal = PortalResolver::new("#modal-root");
//! assert_eq!(portal.resolve(&host), Resolution::Ready(root));
//! ```

pub mod error;
pub mod fsm;
pub mod host;
pub mod notify;
pub mod portal;

pub use error::PortalError;
pub use fsm::{transition, StateTransitions};
pub use host::{Host, MemoryHost, MountId, MountLookup};
pub use notify::{notify_all, DirtyFlag, Subscriber, Subscribers, SubscriptionId};
pub use portal::{PortalResolver, PortalTarget, Resolution};
