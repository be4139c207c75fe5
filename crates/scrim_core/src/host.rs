//! Host render environment
//!
//! Overlays are not rendered by their callers. They are attached to a mount
//! point that lives somewhere else in the host's tree, identified by a stable
//! id such as `modal-root`. This module describes what the overlay core needs
//! from a host and ships an in-memory host used by tests and headless demos.
//!
//! # Example
//!
//! ```rust
//! use scrim_core::host::{Host, MemoryHost, MountLookup};
//!
//! let mut host: MemoryHost<&'static str> = MemoryHost::new();
//! let root = host.add_mount("modal-root");
//! host.signal_ready();
//!
//! assert_eq!(host.lookup("modal-root"), Some(root));
//! assert!(host.attach(root, "overlay"));
//! assert_eq!(host.content(root), Some(&"overlay"));
//! ```

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a mount point in the host tree
    pub struct MountId;
}

/// Read side of the host: readiness and mount point lookup
pub trait MountLookup {
    /// Whether the host has finished its initial render
    ///
    /// Mount points may not exist before this returns true.
    fn is_ready(&self) -> bool;

    /// Find the mount point carrying `id`
    fn lookup(&self, id: &str) -> Option<MountId>;
}

/// A host that can attach content of type `V` to its mount points
pub trait Host<V>: MountLookup {
    /// Attach `content` at `mount`, replacing whatever was there
    ///
    /// Returns false if `mount` no longer exists.
    fn attach(&mut self, mount: MountId, content: V) -> bool;

    /// Remove the content at `mount`, returning it
    fn detach(&mut self, mount: MountId) -> Option<V>;
}

struct MountNode<V> {
    id: String,
    content: Option<V>,
}

/// In-memory host tree
///
/// Keeps mount points in a slot map so a removed and re-added mount point gets
/// a fresh handle. Counts attaches and detaches so callers can check that
/// content was (or was not) remounted.
pub struct MemoryHost<V> {
    nodes: SlotMap<MountId, MountNode<V>>,
    by_id: FxHashMap<String, MountId>,
    ready: bool,
    attach_count: usize,
    detach_count: usize,
}

impl<V> MemoryHost<V> {
    /// Create an empty host that has not signalled readiness
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            by_id: FxHashMap::default(),
            ready: false,
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// Add a mount point, or return the existing one with the same id
    pub fn add_mount(&mut self, id: impl Into<String>) -> MountId {
        let id = id.into();
        if let Some(existing) = self.by_id.get(&id) {
            return *existing;
        }
        let mount = self.nodes.insert(MountNode {
            id: id.clone(),
            content: None,
        });
        tracing::debug!(%id, ?mount, "MemoryHost: added mount point");
        self.by_id.insert(id, mount);
        mount
    }

    /// Remove a mount point and anything attached to it
    pub fn remove_mount(&mut self, id: &str) -> bool {
        match self.by_id.remove(id) {
            Some(mount) => {
                self.nodes.remove(mount);
                true
            }
            None => false,
        }
    }

    /// Mark the initial render as finished
    pub fn signal_ready(&mut self) {
        self.ready = true;
    }

    /// Content currently attached at `mount`
    pub fn content(&self, mount: MountId) -> Option<&V> {
        self.nodes.get(mount).and_then(|n| n.content.as_ref())
    }

    /// Content attached at the mount point named `id`
    pub fn content_at(&self, id: &str) -> Option<&V> {
        self.by_id.get(id).and_then(|m| self.content(*m))
    }

    /// Id of a mount point
    pub fn mount_name(&self, mount: MountId) -> Option<&str> {
        self.nodes.get(mount).map(|n| n.id.as_str())
    }

    /// Number of mount points that currently hold content
    pub fn occupied(&self) -> usize {
        self.nodes.values().filter(|n| n.content.is_some()).count()
    }

    /// Total attach calls seen
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Total detach calls that removed content
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }
}

impl<V> Default for MemoryHost<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MountLookup for MemoryHost<V> {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn lookup(&self, id: &str) -> Option<MountId> {
        self.by_id.get(id).copied()
    }
}

impl<V> Host<V> for MemoryHost<V> {
    fn attach(&mut self, mount: MountId, content: V) -> bool {
        match self.nodes.get_mut(mount) {
            Some(node) => {
                node.content = Some(content);
                self.attach_count += 1;
                true
            }
            None => {
                tracing::debug!(?mount, "MemoryHost: attach to stale mount ignored");
                false
            }
        }
    }

    fn detach(&mut self, mount: MountId) -> Option<V> {
        let removed = self.nodes.get_mut(mount).and_then(|n| n.content.take());
        if removed.is_some() {
            self.detach_count += 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_mount_is_idempotent() {
        let mut host: MemoryHost<u32> = MemoryHost::new();
        let a = host.add_mount("modal-root");
        let b = host.add_mount("modal-root");
        assert_eq!(a, b);
        assert_eq!(host.mount_name(a), Some("modal-root"));
    }

    #[test]
    fn test_attach_replaces_and_detach_removes() {
        let mut host: MemoryHost<u32> = MemoryHost::new();
        let root = host.add_mount("modal-root");

        assert!(host.attach(root, 1));
        assert!(host.attach(root, 2));
        assert_eq!(host.content(root), Some(&2));
        assert_eq!(host.attach_count(), 2);

        assert_eq!(host.detach(root), Some(2));
        assert_eq!(host.detach(root), None);
        assert_eq!(host.detach_count(), 1);
        assert_eq!(host.occupied(), 0);
    }

    #[test]
    fn test_removed_mount_is_stale() {
        let mut host: MemoryHost<u32> = MemoryHost::new();
        let old = host.add_mount("modal-root");
        assert!(host.remove_mount("modal-root"));

        assert!(!host.attach(old, 7));
        assert_eq!(host.attach_count(), 0);

        let fresh = host.add_mount("modal-root");
        assert_ne!(old, fresh);
        assert_eq!(host.lookup("modal-root"), Some(fresh));
    }

    #[test]
    fn test_readiness_is_explicit() {
        let mut host: MemoryHost<u32> = MemoryHost::new();
        assert!(!host.is_ready());
        host.signal_ready();
        assert!(host.is_ready());
    }
}
