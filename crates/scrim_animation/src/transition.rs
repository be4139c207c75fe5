//! Enter/exit transitions
//!
//! A transition runner animates a panel between three named poses:
//! `hidden` (where entering starts), `visible` (rest) and `exit` (where
//! leaving ends). It only has to report when a direction has finished; what
//! happens on completion is up to the owner.
//!
//! Progress is a single scalar: 0.0 is off-screen, 1.0 is at rest. Reversing
//! direction mid-flight keeps the current progress and velocity, so an exit
//! interrupted by a new enter turns around smoothly instead of restarting.
//!
//! # Example
//!
//! ```rust
//! use scrim_animation::{SpringTransition, TransitionDirection, TransitionRunner};
//!
//! let mut enter = SpringTransition::default();
//! enter.start(TransitionDirection::Enter);
//!
//! let mut finished = None;
//! for _ in 0..240 {
//!     if let Some(done) = enter.advance(1.0 / 60.0) {
//!         finished = Some(done);
//!         break;
//!     }
//! }
//! assert_eq!(finished, Some(TransitionDirection::Enter));
//! assert_eq!(enter.progress(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::spring::{Spring, SpringConfig};
use crate::values::{Interpolate, Pose};

/// Largest integration step; longer frames are sub-stepped
const MAX_STEP_SECS: f32 = 1.0 / 120.0;

/// Frame gaps beyond this (e.g. a suspended window) are treated as this long
const MAX_FRAME_SECS: f32 = 0.1;

/// Rest thresholds for a 0..1 progress value
const PROGRESS_REST_DELTA: f32 = 0.001;
const PROGRESS_REST_SPEED: f32 = 0.01;

/// Which way a transition is heading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionDirection {
    /// hidden -> visible
    Enter,
    /// visible -> exit
    Exit,
}

impl TransitionDirection {
    fn target_progress(self) -> f32 {
        match self {
            TransitionDirection::Enter => 1.0,
            TransitionDirection::Exit => 0.0,
        }
    }
}

/// The three named poses of an enter/exit transition
///
/// When deserialized, each pose is merged field by field onto the modal
/// variants, so `[exit] offset_y = 40.0` still leaves the panel transparent
/// and collapsed at the end of the exit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "VariantOverrides")]
pub struct TransitionVariants {
    pub hidden: Pose,
    pub visible: Pose,
    pub exit: Pose,
}

impl TransitionVariants {
    /// Modal variants: drop in from above while growing and fading in,
    /// leave the same way
    pub fn modal() -> Self {
        Self {
            hidden: Pose::collapsed(),
            visible: Pose::rest(),
            exit: Pose::collapsed(),
        }
    }

    /// Pose at `progress` for a transition heading in `direction`
    pub fn pose_at(&self, direction: TransitionDirection, progress: f32) -> Pose {
        let from = match direction {
            TransitionDirection::Enter => self.hidden,
            TransitionDirection::Exit => self.exit,
        };
        from.lerp(&self.visible, progress).clamped()
    }
}

impl Default for TransitionVariants {
    fn default() -> Self {
        Self::modal()
    }
}

/// Partially specified pose as it appears in a settings file
#[derive(Clone, Copy, Debug, Default, Deserialize)]
struct PoseOverride {
    opacity: Option<f32>,
    offset_y: Option<f32>,
    scale: Option<f32>,
}

impl PoseOverride {
    fn apply(self, base: Pose) -> Pose {
        Pose {
            opacity: self.opacity.unwrap_or(base.opacity),
            offset_y: self.offset_y.unwrap_or(base.offset_y),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
struct VariantOverrides {
    hidden: PoseOverride,
    visible: PoseOverride,
    exit: PoseOverride,
}

impl From<VariantOverrides> for TransitionVariants {
    fn from(overrides: VariantOverrides) -> Self {
        let base = Self::modal();
        Self {
            hidden: overrides.hidden.apply(base.hidden),
            visible: overrides.visible.apply(base.visible),
            exit: overrides.exit.apply(base.exit),
        }
    }
}

/// Runs enter/exit animations and reports completion
pub trait TransitionRunner: Send {
    /// Begin (or reverse into) `direction`
    fn start(&mut self, direction: TransitionDirection);

    /// Advance by `dt` seconds
    ///
    /// Returns the direction that finished during this call, once per start.
    fn advance(&mut self, dt: f32) -> Option<TransitionDirection>;

    /// Direction currently running, if any
    fn running(&self) -> Option<TransitionDirection>;

    /// 0.0 (off) to 1.0 (rest); may briefly exceed 1.0 on overshoot
    fn progress(&self) -> f32;

    /// Pose to draw this frame
    fn pose(&self) -> Pose;

    /// Stop and jump to the hidden pose
    fn reset(&mut self);

    /// Check if an animation is in flight
    fn is_running(&self) -> bool {
        self.running().is_some()
    }
}

// =============================================================================
// SpringTransition
// =============================================================================

/// Spring-driven transition
#[derive(Clone, Debug)]
pub struct SpringTransition {
    spring: Spring,
    variants: TransitionVariants,
    running: Option<TransitionDirection>,
    /// Direction of the most recent start; picks the off-screen pose
    heading: TransitionDirection,
}

impl SpringTransition {
    pub fn new(config: SpringConfig, variants: TransitionVariants) -> Self {
        Self {
            spring: Spring::new(config, 0.0)
                .with_precision(PROGRESS_REST_DELTA, PROGRESS_REST_SPEED),
            variants,
            running: None,
            heading: TransitionDirection::Enter,
        }
    }

    /// Current progress velocity (per second)
    pub fn velocity(&self) -> f32 {
        self.spring.velocity()
    }
}

impl Default for SpringTransition {
    fn default() -> Self {
        Self::new(SpringConfig::modal(), TransitionVariants::modal())
    }
}

impl TransitionRunner for SpringTransition {
    fn start(&mut self, direction: TransitionDirection) {
        if self.running.is_some() && self.running != Some(direction) {
            tracing::debug!(
                ?direction,
                progress = self.spring.value(),
                velocity = self.spring.velocity(),
                "SpringTransition: reversing mid-flight"
            );
        }
        self.heading = direction;
        self.running = Some(direction);
        self.spring.set_target(direction.target_progress());
    }

    fn advance(&mut self, dt: f32) -> Option<TransitionDirection> {
        let direction = self.running?;

        let dt = dt.clamp(0.0, MAX_FRAME_SECS);
        let steps = (dt / MAX_STEP_SECS).ceil() as u32;
        if steps > 0 {
            let step = dt / steps as f32;
            for _ in 0..steps {
                self.spring.step(step);
            }
        }
        tracing::trace!(
            ?direction,
            progress = self.spring.value(),
            "SpringTransition: advance"
        );

        if self.spring.is_settled() {
            self.spring.snap_to(direction.target_progress());
            self.running = None;
            return Some(direction);
        }
        None
    }

    fn running(&self) -> Option<TransitionDirection> {
        self.running
    }

    fn progress(&self) -> f32 {
        self.spring.value()
    }

    fn pose(&self) -> Pose {
        self.variants.pose_at(self.heading, self.spring.value())
    }

    fn reset(&mut self) {
        self.spring.snap_to(0.0);
        self.running = None;
        self.heading = TransitionDirection::Enter;
    }
}

// =============================================================================
// InstantTransition
// =============================================================================

/// Transition that completes on the next advance
///
/// For reduced-motion settings and deterministic tests.
#[derive(Clone, Debug, Default)]
pub struct InstantTransition {
    variants: TransitionVariants,
    running: Option<TransitionDirection>,
    heading: Option<TransitionDirection>,
    progress: f32,
}

impl InstantTransition {
    pub fn new(variants: TransitionVariants) -> Self {
        Self {
            variants,
            ..Self::default()
        }
    }
}

impl TransitionRunner for InstantTransition {
    fn start(&mut self, direction: TransitionDirection) {
        self.heading = Some(direction);
        self.running = Some(direction);
    }

    fn advance(&mut self, _dt: f32) -> Option<TransitionDirection> {
        let direction = self.running.take()?;
        self.progress = direction.target_progress();
        Some(direction)
    }

    fn running(&self) -> Option<TransitionDirection> {
        self.running
    }

    fn progress(&self) -> f32 {
        self.progress
    }

    fn pose(&self) -> Pose {
        let heading = self.heading.unwrap_or(TransitionDirection::Enter);
        self.variants.pose_at(heading, self.progress)
    }

    fn reset(&mut self) {
        self.running = None;
        self.heading = None;
        self.progress = 0.0;
    }
}
