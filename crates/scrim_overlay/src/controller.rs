//! Overlay controller
//!
//! One [`OverlayController`] owns one overlay slot: at most one overlay is
//! visible through it at a time. Call sites share the slot by cloning the
//! controller (or borrowing it as an [`OverlayService`]) instead of reaching
//! for a global, so independent slots can coexist.
//!
//! # Lifecycle
//!
//! ```text
//!   show()           enter done          close()           exit done
//! Hidden ──> Showing ──────────> Visible ──────> Hiding ───────────> Hidden
//!                                  ^                │
//!                                  └── Showing <────┘ show() (exit cancelled)
//! ```
//!
//! `close()` commits immediately: the overlay stops being visible and its
//! `on_close` callback runs, but the content stays mounted until the exit
//! animation finishes. A `show()` during that window turns the animation
//! around without unmounting.
//!
//! # Frame loop
//!
//! The host drives the controller once per frame:
//!
//! ```rust
//! use scrim_core::MemoryHost;
//! use scrim_overlay::{OverlayConfig, OverlayController, OverlayView, RenderOutcome};
//!
//! let mut host: MemoryHost<OverlayView> = MemoryHost::new();
//! host.add_mount("modal-root");
//! host.signal_ready();
//!
//! let overlay = OverlayController::new();
//! overlay.show(OverlayConfig::success("Success", "Saved"));
//!
//! for frame in 0..60u64 {
//!     overlay.update(frame * 16);
//!     overlay.render(&mut host);
//! }
//! assert!(host.content_at("modal-root").is_some());
//! ```
//!
//! # Callbacks
//!
//! Subscribers and `on_close` run after the internal lock is released, so
//! they may call back into the controller (e.g. chain another `show()`).

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scrim_animation::{SpringTransition, TransitionDirection, TransitionRunner};
use scrim_core::fsm::transition;
use scrim_core::{
    notify_all, DirtyFlag, Host, MountId, PortalError, PortalResolver, Resolution, Subscriber,
    Subscribers, SubscriptionId,
};
use smallvec::SmallVec;

use crate::config::{AlertKind, OnCloseCallback, OverlayConfig};
use crate::settings::OverlaySettings;
use crate::state::{OverlayEvent, OverlayPhase};
use crate::view::OverlayView;

// =============================================================================
// Public types
// =============================================================================

/// The caller-facing surface of an overlay slot
///
/// Components that only need to request overlays take this instead of the
/// whole controller.
pub trait OverlayService {
    /// Show `config`, replacing whatever is showing
    fn show(&self, config: OverlayConfig);
    /// Close the current overlay; a no-op when nothing is visible
    fn close(&self);
    /// Logical visibility (between `show()` and `close()`)
    fn is_visible(&self) -> bool;
}

/// What a user did to dismiss the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DismissSource {
    /// Click on the backdrop
    Backdrop,
    /// The close button
    CloseButton,
    /// Escape key
    Escape,
}

/// State published to subscribers after every committed change
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySnapshot {
    pub phase: OverlayPhase,
    /// Incremented by every `show()`
    pub generation: u64,
    pub title: String,
    pub kind: Option<AlertKind>,
    pub closable: bool,
}

impl OverlaySnapshot {
    pub fn is_visible(&self) -> bool {
        self.phase.is_visible()
    }
}

/// Result of a render pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Portal target not resolved; nothing rendered
    NotReady,
    /// Overlay attached (or refreshed) at the mount point
    Mounted,
    /// Overlay removed after its exit animation
    Unmounted,
    /// Nothing to show and nothing mounted
    Idle,
}

// =============================================================================
// Effects
// =============================================================================

/// Callbacks collected under the lock and run after it is released
#[must_use]
#[derive(Default)]
struct Effects {
    notify: Option<(SmallVec<[Subscriber<OverlaySnapshot>; 4]>, OverlaySnapshot)>,
    on_close: Option<OnCloseCallback>,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }

    fn run(self) {
        // Subscribers hear about the close before on_close can show() again
        if let Some((subscribers, snapshot)) = self.notify {
            notify_all(&subscribers, &snapshot);
        }
        if let Some(on_close) = self.on_close {
            on_close();
        }
    }
}

// =============================================================================
// ControllerInner
// =============================================================================

struct ControllerInner {
    phase: OverlayPhase,
    /// Most recent config; kept after close until the next show
    config: OverlayConfig,
    /// Close callback of the current showing, taken when it closes
    armed_on_close: Option<OnCloseCallback>,
    transition: Box<dyn TransitionRunner>,
    portal: PortalResolver,
    /// Mount point currently holding our content
    mounted: Option<MountId>,
    settings: OverlaySettings,
    subscribers: Subscribers<OverlaySnapshot>,
    dirty: DirtyFlag,
    last_frame_ms: Option<u64>,
    generation: u64,
}

impl ControllerInner {
    fn new(settings: OverlaySettings, transition: Box<dyn TransitionRunner>) -> Self {
        Self {
            phase: OverlayPhase::Hidden,
            config: OverlayConfig::default(),
            armed_on_close: None,
            transition,
            portal: PortalResolver::new(settings.portal_target.clone()),
            mounted: None,
            settings,
            subscribers: Subscribers::new(),
            dirty: DirtyFlag::new(),
            last_frame_ms: None,
            generation: 0,
        }
    }

    fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            phase: self.phase,
            generation: self.generation,
            title: self.config.title.clone(),
            kind: self.config.kind,
            closable: self.config.closable,
        }
    }

    /// Mark dirty and collect subscribers for a committed change
    fn changed(&self) -> Effects {
        self.dirty.mark();
        if self.subscribers.is_empty() {
            return Effects::none();
        }
        Effects {
            notify: Some((self.subscribers.snapshot(), self.snapshot())),
            on_close: None,
        }
    }

    fn show(&mut self, config: OverlayConfig) -> Effects {
        let from = self.phase;
        if !transition(&mut self.phase, OverlayEvent::Show) {
            return Effects::none();
        }

        self.generation += 1;
        self.armed_on_close = Some(config.close_callback());
        self.config = config;

        match from {
            OverlayPhase::Hidden => {
                self.transition.reset();
                self.start_transition(TransitionDirection::Enter);
            }
            OverlayPhase::Hiding => {
                // Turn the exit around; content stays mounted
                self.start_transition(TransitionDirection::Enter);
            }
            OverlayPhase::Showing | OverlayPhase::Visible => {}
        }

        tracing::debug!(
            ?from,
            to = ?self.phase,
            generation = self.generation,
            title = %self.config.title,
            kind = ?self.config.kind,
            closable = self.config.closable,
            "OverlayController::show"
        );
        self.changed()
    }

    fn close(&mut self) -> Effects {
        let from = self.phase;
        if !transition(&mut self.phase, OverlayEvent::Close) {
            tracing::debug!(phase = ?from, "OverlayController::close ignored, nothing visible");
            return Effects::none();
        }

        self.start_transition(TransitionDirection::Exit);
        tracing::debug!(?from, generation = self.generation, "OverlayController::close");

        let mut effects = self.changed();
        effects.on_close = self.armed_on_close.take();
        effects
    }

    /// Start, or reverse into, `direction`
    fn start_transition(&mut self, direction: TransitionDirection) {
        // An animation starting from rest begins at its first update, not at
        // whatever frame the host last reported before going idle
        if !self.transition.is_running() {
            self.last_frame_ms = None;
        }
        self.transition.start(direction);
    }

    fn dismiss(&mut self, source: DismissSource) -> (bool, Effects) {
        if !self.phase.is_visible() {
            return (false, Effects::none());
        }
        if !self.config.closable {
            tracing::debug!(?source, "dismiss ignored, overlay is not closable");
            return (false, Effects::none());
        }
        tracing::debug!(?source, "OverlayController: user dismissed overlay");
        (true, self.close())
    }

    fn update(&mut self, now_ms: u64) -> Effects {
        let elapsed_ms = self
            .last_frame_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        self.last_frame_ms = Some(now_ms);

        if !self.transition.is_running() {
            return Effects::none();
        }

        let event = match self.transition.advance(elapsed_ms as f32 / 1000.0) {
            Some(TransitionDirection::Enter) => OverlayEvent::EnterComplete,
            Some(TransitionDirection::Exit) => OverlayEvent::ExitComplete,
            None => {
                // Mid-animation: redraw, no state change
                self.dirty.mark();
                return Effects::none();
            }
        };

        let from = self.phase;
        if transition(&mut self.phase, event) {
            tracing::debug!(?from, to = ?self.phase, "OverlayController: transition finished");
            self.changed()
        } else {
            Effects::none()
        }
    }

    fn view(&self) -> Option<OverlayView> {
        self.phase
            .is_mounted()
            .then(|| OverlayView::build(&self.config, &self.settings, self.transition.pose()))
    }

    fn render<H: Host<OverlayView>>(&mut self, host: &mut H) -> RenderOutcome {
        let mount = match self.portal.resolve(&*host) {
            Resolution::Ready(mount) => mount,
            Resolution::NotReady => return RenderOutcome::NotReady,
        };

        if let Some(old) = self.mounted.filter(|old| *old != mount) {
            host.detach(old);
            self.mounted = None;
        }

        match self.view() {
            Some(view) => {
                if !host.attach(mount, view) {
                    if self.mounted.take().is_some() {
                        tracing::warn!(?mount, "portal mount point went away, overlay not rendered");
                    }
                    return RenderOutcome::NotReady;
                }
                if self.mounted.replace(mount).is_none() {
                    tracing::debug!(?mount, phase = ?self.phase, "overlay mounted");
                }
                RenderOutcome::Mounted
            }
            None => match self.mounted.take() {
                Some(mounted) => {
                    host.detach(mounted);
                    tracing::debug!(mount = ?mounted, "overlay unmounted");
                    RenderOutcome::Unmounted
                }
                None => RenderOutcome::Idle,
            },
        }
    }
}

// =============================================================================
// OverlayController
// =============================================================================

/// Shared handle to one overlay slot
#[derive(Clone)]
pub struct OverlayController {
    inner: Arc<Mutex<ControllerInner>>,
}

impl OverlayController {
    /// Create a controller with default settings and the modal spring
    pub fn new() -> Self {
        Self::with_settings(OverlaySettings::default())
    }

    /// Create a controller animated by a spring built from `settings`
    ///
    /// Out-of-range values fall back to their defaults (see
    /// [`OverlaySettings::sanitized`]).
    pub fn with_settings(settings: OverlaySettings) -> Self {
        let settings = settings.sanitized();
        let transition = SpringTransition::new(settings.spring, settings.transition);
        Self::with_transition(settings, transition)
    }

    /// Create a controller with a custom transition runner
    pub fn with_transition(
        settings: OverlaySettings,
        transition: impl TransitionRunner + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner::new(
                settings.sanitized(),
                Box::new(transition),
            ))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `config`
    ///
    /// Replaces any overlay already showing (no stacking); the replaced
    /// showing's `on_close` is dropped without running. Called while the
    /// previous overlay is still animating out, the exit is cancelled and the
    /// new content animates back in without being unmounted.
    pub fn show(&self, config: OverlayConfig) {
        let effects = {
            let mut inner = self.lock();
            inner.show(config)
        };
        effects.run();
    }

    /// Close the current overlay
    ///
    /// Starts the exit animation and runs `on_close` once. Calling it again
    /// before the next `show()`, including while the exit animation plays, is
    /// a no-op.
    pub fn close(&self) {
        let effects = {
            let mut inner = self.lock();
            inner.close()
        };
        effects.run();
    }

    /// Dismiss on behalf of the user
    ///
    /// Only closes when the overlay is visible and closable. Returns true if
    /// it closed.
    pub fn dismiss(&self, source: DismissSource) -> bool {
        let (closed, effects) = {
            let mut inner = self.lock();
            inner.dismiss(source)
        };
        effects.run();
        closed
    }

    /// Handle a click on the backdrop
    pub fn handle_backdrop_click(&self) -> bool {
        self.dismiss(DismissSource::Backdrop)
    }

    /// Handle a press of the close button
    pub fn handle_close_button(&self) -> bool {
        self.dismiss(DismissSource::CloseButton)
    }

    /// Handle the escape key
    pub fn handle_escape(&self) -> bool {
        self.dismiss(DismissSource::Escape)
    }

    /// Advance animations - call every frame
    ///
    /// Finishing the enter animation makes the overlay `Visible`; finishing
    /// the exit animation makes it `Hidden` so the next render unmounts it.
    pub fn update(&self, current_time_ms: u64) {
        let effects = {
            let mut inner = self.lock();
            inner.update(current_time_ms)
        };
        effects.run();
    }

    /// Render into `host` through the portal
    ///
    /// Resolves the portal target on first use after the host is ready. Until
    /// then nothing is rendered and `NotReady` is returned.
    pub fn render<H: Host<OverlayView>>(&self, host: &mut H) -> RenderOutcome {
        self.lock().render(host)
    }

    /// The overlay tree for the current frame, if anything is mounted
    pub fn view(&self) -> Option<OverlayView> {
        self.lock().view()
    }

    /// Re-arm portal resolution after the host tree was rebuilt
    ///
    /// Forgets the previous mount point without detaching from it.
    pub fn reset_portal(&self) {
        let mut inner = self.lock();
        inner.portal.reset();
        inner.mounted = None;
    }

    pub fn phase(&self) -> OverlayPhase {
        self.lock().phase
    }

    /// Logical visibility (true in `Showing` and `Visible`)
    pub fn is_visible(&self) -> bool {
        self.lock().phase.is_visible()
    }

    /// Whether content is attached to the host right now
    pub fn is_mounted(&self) -> bool {
        self.lock().mounted.is_some()
    }

    /// The most recently shown config
    pub fn config(&self) -> OverlayConfig {
        self.lock().config.clone()
    }

    pub fn settings(&self) -> OverlaySettings {
        self.lock().settings.clone()
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        self.lock().snapshot()
    }

    /// Why the portal has not resolved, for diagnostics
    pub fn portal_error(&self) -> Option<PortalError> {
        self.lock().portal.last_error()
    }

    /// Subscribe to committed state changes
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&OverlaySnapshot) + Send + Sync + 'static,
    {
        self.lock().subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscribers.unsubscribe(id)
    }

    /// Check and clear the redraw flag
    pub fn take_dirty(&self) -> bool {
        self.lock().dirty.take()
    }

    /// Check the redraw flag without clearing
    pub fn is_dirty(&self) -> bool {
        self.lock().dirty.is_dirty()
    }

    /// Check if a redraw is pending or an animation is in flight
    pub fn needs_redraw(&self) -> bool {
        let inner = self.lock();
        inner.dirty.is_dirty() || inner.transition.is_running()
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayService for OverlayController {
    fn show(&self, config: OverlayConfig) {
        OverlayController::show(self, config);
    }

    fn close(&self) {
        OverlayController::close(self);
    }

    fn is_visible(&self) -> bool {
        OverlayController::is_visible(self)
    }
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("OverlayController")
            .field("phase", &inner.phase)
            .field("generation", &inner.generation)
            .field("config", &inner.config)
            .field("portal", &inner.portal.selector())
            .field("mounted", &inner.mounted)
            .finish()
    }
}
