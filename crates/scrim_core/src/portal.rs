//! Portal target resolution
//!
//! A portal renders content into a mount point outside the caller's own
//! subtree. Finding that mount point is eventually consistent: during the
//! host's first render it may not exist yet. The resolver therefore waits for
//! the host to signal readiness, then makes exactly one lookup. A miss at that
//! point is a configuration defect; it is logged once and the resolver stays
//! `NotReady` for good, so whatever depends on it renders nothing.
//!
//! # Example
//!
//! ```rust
//! use scrim_core::host::MemoryHost;
//! use scrim_core::portal::{PortalResolver, Resolution};
//!
//! let mut host: MemoryHost<()> = MemoryHost::new();
//! let mut resolver = PortalResolver::new("#modal-root");
//!
//! // Host still rendering: not an error, just not ready
//! assert_eq!(resolver.resolve(&host), Resolution::NotReady);
//!
//! let root = host.add_mount("modal-root");
//! host.signal_ready();
//! assert_eq!(resolver.resolve(&host), Resolution::Ready(root));
//! ```

use std::fmt;

use crate::error::{PortalError, Result};
use crate::host::{MountId, MountLookup};

/// A parsed mount point selector
///
/// Accepts an id selector with or without the leading `#`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PortalTarget(String);

impl PortalTarget {
    /// Parse a selector such as `#modal-root`
    pub fn parse(selector: &str) -> Result<Self> {
        let id = selector.trim();
        let id = id.strip_prefix('#').unwrap_or(id);
        if id.is_empty() || id.contains(char::is_whitespace) || id.contains('#') {
            return Err(PortalError::InvalidSelector(selector.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// The bare mount point id
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a resolution attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The mount point is known
    Ready(MountId),
    /// Nothing can be rendered yet (or ever, after a failed attempt)
    NotReady,
}

/// Internal resolver state
#[derive(Clone, Debug, PartialEq, Eq)]
enum PortalState {
    /// Waiting for the host; no attempt spent
    Pending,
    /// Lookup succeeded
    Resolved(MountId),
    /// The single attempt failed
    Unavailable(PortalError),
}

/// Locates the external mount point for one overlay slot
#[derive(Clone, Debug)]
pub struct PortalResolver {
    selector: String,
    target: Result<PortalTarget>,
    state: PortalState,
}

impl PortalResolver {
    /// Create a resolver for `selector`
    ///
    /// An invalid selector is not reported here; it surfaces as a
    /// configuration defect on the first attempt.
    pub fn new(selector: impl Into<String>) -> Self {
        let selector = selector.into();
        let target = PortalTarget::parse(&selector);
        Self {
            selector,
            target,
            state: PortalState::Pending,
        }
    }

    /// The selector this resolver was created with
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Resolve against `host`
    ///
    /// Returns `NotReady` without spending the attempt while the host is not
    /// ready. Once resolved, the cached mount point is returned without
    /// touching the host again.
    pub fn resolve(&mut self, host: &impl MountLookup) -> Resolution {
        match &self.state {
            PortalState::Resolved(mount) => return Resolution::Ready(*mount),
            PortalState::Unavailable(_) => return Resolution::NotReady,
            PortalState::Pending => {}
        }

        if !host.is_ready() {
            return Resolution::NotReady;
        }

        let lookup = match &self.target {
            Ok(target) => host
                .lookup(target.id())
                .ok_or_else(|| PortalError::TargetMissing(target.id().to_string())),
            Err(err) => Err(err.clone()),
        };

        match lookup {
            Ok(mount) => {
                tracing::debug!(selector = %self.selector, ?mount, "portal target resolved");
                self.state = PortalState::Resolved(mount);
                Resolution::Ready(mount)
            }
            Err(err) => {
                tracing::warn!(
                    selector = %self.selector,
                    error = %err,
                    "portal target unavailable, overlay will not render"
                );
                self.state = PortalState::Unavailable(err);
                Resolution::NotReady
            }
        }
    }

    /// The resolved mount point without attempting resolution
    pub fn mount(&self) -> Option<MountId> {
        match self.state {
            PortalState::Resolved(mount) => Some(mount),
            _ => None,
        }
    }

    /// Check if the mount point is known
    pub fn is_resolved(&self) -> bool {
        self.mount().is_some()
    }

    /// The configuration defect from a failed attempt
    ///
    /// Returns `HostNotReady` while still waiting for the host.
    pub fn last_error(&self) -> Option<PortalError> {
        match &self.state {
            PortalState::Pending => Some(PortalError::HostNotReady),
            PortalState::Resolved(_) => None,
            PortalState::Unavailable(err) => Some(err.clone()),
        }
    }

    /// Forget any result and allow one new attempt
    ///
    /// Used when the owning scope is re-initialised, e.g. the host tree was
    /// rebuilt and old mount handles are stale.
    pub fn reset(&mut self) {
        self.state = PortalState::Pending;
    }
}
