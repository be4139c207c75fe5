//! Overlay settings
//!
//! Presentation knobs shared by every showing of an overlay slot: where the
//! portal mounts, how dark the backdrop gets, how the panel moves and which
//! icon each variant uses. Every field has a default, so a settings file only
//! needs the values it changes:
//!
//! ```toml
//! portal_target = "#dialogs"
//! backdrop_opacity = 0.6
//!
//! [spring]
//! stiffness = 300.0
//!
//! [icons]
//! warning = "/icon/warn.svg"
//! ```

use std::fs;
use std::path::Path;

use scrim_animation::{SpringConfig, TransitionVariants};
use scrim_core::PortalTarget;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AlertKind;

/// Errors from loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("failed to read overlay settings: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`OverlaySettings`]
    #[error("failed to parse overlay settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but a value is out of range
    #[error("invalid overlay settings: {0}")]
    Invalid(String),
}

/// Icon asset per presentation variant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub success: String,
    pub error: String,
    pub warning: String,
}

impl IconSet {
    /// Icon for `kind`
    pub fn for_kind(&self, kind: AlertKind) -> &str {
        match kind {
            AlertKind::Success => &self.success,
            AlertKind::Error => &self.error,
            AlertKind::Warning => &self.warning,
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            success: "/icon/success.svg".to_string(),
            error: "/icon/fail.png".to_string(),
            warning: "/icon/stop-hand.png".to_string(),
        }
    }
}

/// Settings for one overlay slot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Selector of the mount point the overlay renders into
    pub portal_target: String,
    /// Backdrop opacity when fully shown (0.0 - 1.0)
    pub backdrop_opacity: f32,
    /// Minimum panel width in logical pixels
    pub min_panel_width: f32,
    /// Label of the close button
    pub close_label: String,
    /// Spring driving the enter/exit animation
    pub spring: SpringConfig,
    /// Poses the panel animates between
    pub transition: TransitionVariants,
    pub icons: IconSet,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            portal_target: "#modal-root".to_string(),
            backdrop_opacity: 0.4,
            min_panel_width: 300.0,
            close_label: "Close".to_string(),
            spring: SpringConfig::modal(),
            transition: TransitionVariants::modal(),
            icons: IconSet::default(),
        }
    }
}

impl OverlaySettings {
    /// Parse and validate settings from TOML
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded overlay settings");
        Ok(settings)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        PortalTarget::parse(&self.portal_target)
            .map_err(|err| SettingsError::Invalid(err.to_string()))?;

        match self.value_problems().next() {
            Some((_, problem)) => Err(SettingsError::Invalid(problem)),
            None => Ok(()),
        }
    }

    /// Replace out-of-range values with their defaults
    ///
    /// Used where settings arrive without going through [`validate`], so a
    /// bad spring can never leave an overlay stuck mid-animation. An invalid
    /// portal target is kept: it is reported by the portal resolver.
    ///
    /// [`validate`]: OverlaySettings::validate
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let problems: Vec<_> = self.value_problems().collect();

        for (field, problem) in problems {
            tracing::warn!(%problem, "invalid overlay setting, using the default");
            match field {
                Field::BackdropOpacity => self.backdrop_opacity = defaults.backdrop_opacity,
                Field::Spring => self.spring = defaults.spring,
                Field::MinPanelWidth => self.min_panel_width = defaults.min_panel_width,
                Field::Transition => self.transition = defaults.transition,
            }
        }
        self
    }

    fn value_problems(&self) -> impl Iterator<Item = (Field, String)> + '_ {
        let backdrop = (!(0.0..=1.0).contains(&self.backdrop_opacity)).then(|| {
            format!(
                "backdrop_opacity must be within 0..=1, got {}",
                self.backdrop_opacity
            )
        });
        let width = (!is_non_negative(self.min_panel_width)).then(|| {
            format!(
                "min_panel_width must not be negative, got {}",
                self.min_panel_width
            )
        });

        [
            (Field::BackdropOpacity, backdrop),
            (Field::Spring, spring_problem(&self.spring)),
            (Field::MinPanelWidth, width),
            (Field::Transition, transition_problem(&self.transition)),
        ]
        .into_iter()
        .filter_map(|(field, problem)| problem.map(|problem| (field, problem)))
    }
}

/// Settings fields that can be reset to their default
#[derive(Clone, Copy, Debug)]
enum Field {
    BackdropOpacity,
    Spring,
    MinPanelWidth,
    Transition,
}

fn spring_problem(spring: &SpringConfig) -> Option<String> {
    if !is_positive(spring.stiffness) || !spring.stiffness.is_finite() {
        return Some(format!(
            "spring.stiffness must be positive, got {}",
            spring.stiffness
        ));
    }
    if !is_positive(spring.mass) || !spring.mass.is_finite() {
        return Some(format!("spring.mass must be positive, got {}", spring.mass));
    }
    if !is_non_negative(spring.damping) || !spring.damping.is_finite() {
        return Some(format!(
            "spring.damping must not be negative, got {}",
            spring.damping
        ));
    }
    None
}

fn transition_problem(transition: &TransitionVariants) -> Option<String> {
    [
        ("hidden", transition.hidden),
        ("visible", transition.visible),
        ("exit", transition.exit),
    ]
    .into_iter()
    .find(|(_, pose)| {
        !(pose.opacity.is_finite() && pose.offset_y.is_finite() && pose.scale.is_finite())
    })
    .map(|(name, pose)| format!("transition.{name} must be finite, got {pose:?}"))
}

// NaN fails both checks

fn is_positive(value: f32) -> bool {
    value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value >= 0.0
}
