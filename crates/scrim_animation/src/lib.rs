//! Scrim Animation System
//!
//! Spring physics and enter/exit transitions for overlays.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Poses**: Interpolatable opacity/offset/scale triples
//! - **Transitions**: Enter/exit runners with completion reporting
//! - **Interruptible**: Reversing a transition inherits its velocity

pub mod spring;
pub mod transition;
pub mod values;

pub use spring::{Spring, SpringConfig};
pub use transition::{
    InstantTransition, SpringTransition, TransitionDirection, TransitionRunner,
    TransitionVariants,
};
pub use values::{Interpolate, Pose};
