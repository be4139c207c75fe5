//! Animatable value types
//!
//! Provides the interpolation trait and the [`Pose`] an overlay panel is drawn in.

use serde::{Deserialize, Serialize};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    ///
    /// `t` outside 0..1 extrapolates, which is how spring overshoot shows.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// ============================================================================
// Pose
// ============================================================================

/// Visual pose of an animated panel
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f32,
    /// Vertical offset from the resting position in logical pixels
    pub offset_y: f32,
    /// Uniform scale, 1.0 at rest
    pub scale: f32,
}

impl Pose {
    pub const fn new(opacity: f32, offset_y: f32, scale: f32) -> Self {
        Self {
            opacity,
            offset_y,
            scale,
        }
    }

    /// Resting pose: opaque, in place, full size
    pub const fn rest() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }

    /// Collapsed above the resting position and fully transparent
    pub const fn collapsed() -> Self {
        Self::new(0.0, -100.0, 0.0)
    }

    /// Keep opacity inside 0..1 and scale non-negative
    ///
    /// Offsets are left alone so overshoot stays visible as motion.
    pub fn clamped(self) -> Self {
        Self {
            opacity: self.opacity.clamp(0.0, 1.0),
            offset_y: self.offset_y,
            scale: self.scale.max(0.0),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::rest()
    }
}

impl Interpolate for Pose {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: Interpolate::lerp(&self.opacity, &other.opacity, t),
            offset_y: Interpolate::lerp(&self.offset_y, &other.offset_y, t),
            scale: Interpolate::lerp(&self.scale, &other.scale, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(Interpolate::lerp(&0.0f32, &10.0, 0.5), 5.0);
        assert_eq!(Interpolate::lerp(&0.0f32, &10.0, 1.5), 15.0);
    }

    #[test]
    fn test_pose_lerp_endpoints() {
        let from = Pose::collapsed();
        let to = Pose::rest();
        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        assert_eq!(from.lerp(&to, 0.5), Pose::new(0.5, -50.0, 0.5));
    }

    #[test]
    fn test_pose_clamped_keeps_overshoot_offset() {
        let overshoot = Pose::collapsed().lerp(&Pose::rest(), 1.1).clamped();
        assert_eq!(overshoot.opacity, 1.0);
        assert!(overshoot.scale > 1.0);
        assert!(overshoot.offset_y > 0.0);

        let under = Pose::new(-0.2, 0.0, -0.1).clamped();
        assert_eq!(under.opacity, 0.0);
        assert_eq!(under.scale, 0.0);
    }
}
