//! Rendered overlay tree
//!
//! The controller does not draw. It produces an [`OverlayView`], a plain
//! description of the backdrop and the centered panel, and attaches it to the
//! portal mount point. Hosts turn it into pixels, cells or DOM nodes.

use scrim_animation::Pose;

use crate::config::{AlertKind, OverlayConfig};
use crate::settings::OverlaySettings;

/// Full-viewport layer behind the panel
#[derive(Clone, Debug, PartialEq)]
pub struct BackdropView {
    /// Current opacity, already scaled by the transition
    pub opacity: f32,
    /// Whether a click on the backdrop dismisses the overlay
    pub dismissable: bool,
}

/// Close affordance inside the panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseButton {
    pub label: String,
}

/// The centered content panel
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    pub pose: Pose,
    pub variant: AlertKind,
    pub icon: String,
    pub title: String,
    pub body: String,
    /// Present iff the overlay is closable
    pub close_button: Option<CloseButton>,
    pub min_width: f32,
}

/// Everything mounted into the portal for one overlay
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView {
    pub backdrop: BackdropView,
    pub panel: PanelView,
}

impl OverlayView {
    /// Build the view for `config` drawn at `pose`
    pub fn build(config: &OverlayConfig, settings: &OverlaySettings, pose: Pose) -> Self {
        let variant = AlertKind::resolve(config.kind);

        let backdrop = BackdropView {
            opacity: settings.backdrop_opacity * pose.opacity,
            dismissable: config.closable,
        };

        let panel = PanelView {
            pose,
            variant,
            icon: settings.icons.for_kind(variant).to_string(),
            title: config.title.clone(),
            body: config.body.clone(),
            close_button: config.closable.then(|| CloseButton {
                label: settings.close_label.clone(),
            }),
            min_width: settings.min_panel_width,
        };

        Self { backdrop, panel }
    }

    /// Check if the panel offers a close button
    pub fn has_close_button(&self) -> bool {
        self.panel.close_button.is_some()
    }
}
