//! Overlay payloads
//!
//! An [`OverlayConfig`] is what a caller hands to `show()`: the text to
//! display, an optional presentation variant, whether the user may dismiss it,
//! and a callback to run when it closes.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Callback invoked when an overlay is closed
pub type OnCloseCallback = Arc<dyn Fn() + Send + Sync>;

/// Presentation variant of an alert
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Warning,
}

impl AlertKind {
    /// Variant to draw for an optional kind
    ///
    /// No kind falls back to `Success`, which only changes the icon; the
    /// overlay itself behaves the same.
    pub fn resolve(kind: Option<AlertKind>) -> AlertKind {
        kind.unwrap_or(AlertKind::Success)
    }

    /// Lowercase name, as used in settings files
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
            AlertKind::Warning => "warning",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one showing of an overlay
///
/// ```rust
/// use scrim_overlay::{AlertKind, OverlayConfig};
///
/// let saved = OverlayConfig::success("Success", "Saved");
/// assert_eq!(saved.kind, Some(AlertKind::Success));
/// assert!(saved.closable);
///
/// let busy = OverlayConfig::loading("Processing", "Please wait");
/// assert_eq!(busy.kind, None);
/// assert!(!busy.closable);
/// ```
#[derive(Clone)]
pub struct OverlayConfig {
    pub title: String,
    pub body: String,
    /// Presentation variant; `None` is a valid "no variant" state
    pub kind: Option<AlertKind>,
    /// Whether the user may dismiss via backdrop, close button or escape
    pub closable: bool,
    on_close: OnCloseCallback,
}

impl OverlayConfig {
    /// Create a closable overlay with no variant and a no-op close callback
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: None,
            closable: true,
            on_close: Arc::new(|| {}),
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).kind(AlertKind::Success)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).kind(AlertKind::Error)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).kind(AlertKind::Warning)
    }

    /// Blocking overlay for in-progress work
    ///
    /// Not closable: only a programmatic `close()` dismisses it.
    pub fn loading(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).closable(false)
    }

    /// Set the presentation variant
    pub fn kind(mut self, kind: AlertKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Clear the presentation variant
    pub fn no_kind(mut self) -> Self {
        self.kind = None;
        self
    }

    /// Set whether the user may dismiss the overlay
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Set the callback run once when this showing is closed
    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Arc::new(f);
        self
    }

    /// The close callback
    pub fn close_callback(&self) -> OnCloseCallback {
        Arc::clone(&self.on_close)
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl fmt::Debug for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayConfig")
            .field("title", &self.title)
            .field("body", &self.body)
            .field("kind", &self.kind)
            .field("closable", &self.closable)
            .field("on_close", &"Fn()")
            .finish()
    }
}
