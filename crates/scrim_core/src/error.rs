//! Error types for scrim_core

use thiserror::Error;

/// Reasons a portal target could not be resolved
///
/// These are configuration defects, not runtime failures. The resolver keeps
/// the most recent one for diagnostics and degrades to "not ready" instead of
/// propagating it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// The host has not signalled readiness yet
    #[error("host has not signalled readiness")]
    HostNotReady,

    /// The host is ready but no mount point carries the requested id
    #[error("mount target `{0}` not found in host tree")]
    TargetMissing(String),

    /// The selector cannot name a mount point
    #[error("invalid mount target selector `{0}`")]
    InvalidSelector(String),
}

/// Result type for scrim_core operations
pub type Result<T> = std::result::Result<T, PortalError>;
