use carousel::{
    Axis, Carousel, CarouselOptions, Direction, PointerPosition, Release, ReleaseOutcome,
};

use crate::{
    Autoplay, AutoplayStep, Easing, GestureEvent, GesturePhase, GestureTracker, InertiaDriver,
    PauseReason, Tween,
};

/// Wheel steps closer together than this count as one step.
const WHEEL_DEBOUNCE_MS: u64 = 300;

/// Keys the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

/// A framework-neutral controller that wraps a [`Carousel`] and provides common adapter
/// workflows (gestures, animated transitions, inertia, autoplay, wheel and keyboard input).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `pointer_down` / `pointer_move` / `pointer_up`, `wheel`, `key`, `hover`, `focus` when UI
///   events occur
/// - `tick(now_ms)` each frame (for tweens, inertia and autoplay)
///
/// The engine commits every navigation immediately. The controller only animates the visual
/// translate towards it; render the strip at [`Controller::visual_translate`].
#[derive(Clone, Debug)]
pub struct Controller {
    c: Carousel,
    gesture: GestureTracker,
    tween: Option<Tween>,
    inertia: Option<InertiaDriver>,
    autoplay: Option<Autoplay>,
    last_wheel_ms: Option<u64>,
    easing: Easing,
}

impl Controller {
    pub fn new(options: CarouselOptions) -> Self {
        Self::from_carousel(Carousel::new(options))
    }

    pub fn from_carousel(c: Carousel) -> Self {
        let autoplay = c.options().autoplay.map(Autoplay::new);
        Self {
            gesture: GestureTracker::new(c.geometry()),
            c,
            tween: None,
            inertia: None,
            autoplay,
            last_wheel_ms: None,
            easing: Easing::default(),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.c
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.c
    }

    pub fn into_carousel(self) -> Carousel {
        self.c
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    pub fn autoplay(&self) -> Option<&Autoplay> {
        self.autoplay.as_ref()
    }

    pub fn autoplay_mut(&mut self) -> Option<&mut Autoplay> {
        self.autoplay.as_mut()
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Replaces the carousel options. A changed autoplay configuration restarts the timer.
    pub fn set_options(&mut self, options: CarouselOptions) {
        self.cancel_animation();
        self.c.set_options(options);
        self.sync_options();
    }

    pub fn on_container_size(&mut self, container_size: f32) {
        self.cancel_animation();
        self.c.set_container_size(container_size);
        // Breakpoints can change the axis or autoplay.
        self.sync_options();
    }

    fn sync_options(&mut self) {
        self.gesture.set_geometry(self.c.geometry());
        let wanted = self.c.options().autoplay;
        if self.autoplay.map(|a| *a.options()) != wanted {
            self.autoplay = wanted.map(Autoplay::new);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.inertia.is_some()
    }

    /// Drops any running tween or inertia. The visual translate jumps to the engine's.
    pub fn cancel_animation(&mut self) {
        self.tween = None;
        if let Some(inertia) = self.inertia.take() {
            inertia.token().cancel();
        }
    }

    /// Hands an interrupted animation back to the engine, so the next move starts from what is
    /// on screen.
    fn interrupt(&mut self, now_ms: u64) {
        // Drop transitions committed through `carousel_mut`.
        self.c.take_transition();
        if let Some(tween) = self.tween.take() {
            self.c.set_translate(tween.sample(now_ms));
        }
        if let Some(inertia) = self.inertia.take() {
            inertia.token().cancel();
        }
    }

    /// The translate to render at `now_ms`.
    pub fn visual_translate(&self, now_ms: u64) -> f32 {
        match self.tween {
            Some(tween) => tween.sample(now_ms),
            None => self.c.translate(),
        }
    }

    /// CSS transform for [`Controller::visual_translate`].
    pub fn transform_string(&self, now_ms: u64) -> String {
        self.c.geometry().transform_string(self.visual_translate(now_ms))
    }

    fn animate_transition(&mut self, now_ms: u64) {
        let Some(t) = self.c.take_transition() else {
            return;
        };
        if (t.to_translate - t.from_translate).abs() < 0.5 {
            return;
        }
        atrace!(from = t.from_translate, to = t.to_translate, "tween started");
        self.tween = Some(Tween::new(
            t.from_translate,
            t.to_translate,
            now_ms,
            self.c.options().speed_ms,
            self.easing,
        ));
    }

    fn user_navigated(&mut self, now_ms: u64) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.notify_interaction(now_ms);
        }
    }

    pub fn next(&mut self, now_ms: u64) -> bool {
        self.interrupt(now_ms);
        let moved = self.c.slide_next();
        self.animate_transition(now_ms);
        self.user_navigated(now_ms);
        moved
    }

    pub fn prev(&mut self, now_ms: u64) -> bool {
        self.interrupt(now_ms);
        let moved = self.c.slide_prev();
        self.animate_transition(now_ms);
        self.user_navigated(now_ms);
        moved
    }

    pub fn go_to(&mut self, index: usize, now_ms: u64) -> bool {
        self.interrupt(now_ms);
        let moved = self.c.slide_to(index);
        self.animate_transition(now_ms);
        self.user_navigated(now_ms);
        moved
    }

    /// Forwards a click on a rendered slide (see `slide_on_click`).
    pub fn click(&mut self, index: usize, now_ms: u64) -> bool {
        self.interrupt(now_ms);
        let moved = self.c.click_slide(index);
        self.animate_transition(now_ms);
        if moved {
            self.user_navigated(now_ms);
        }
        moved
    }

    pub fn pointer_down(&mut self, pos: PointerPosition, now_ms: u64) {
        self.interrupt(now_ms);
        self.gesture.set_geometry(self.c.geometry());
        self.gesture.pointer_down(pos, now_ms);
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.pause(PauseReason::Interaction);
        }
    }

    /// Returns `true` when the move was consumed by a carousel drag.
    pub fn pointer_move(&mut self, pos: PointerPosition, now_ms: u64) -> bool {
        match self.gesture.pointer_move(pos, now_ms) {
            GestureEvent::DragStart { delta } => {
                if !self.c.begin_drag() {
                    self.gesture.cancel();
                    return false;
                }
                self.c.drag_by(delta);
                true
            }
            GestureEvent::Drag { delta } => {
                self.c.drag_by(delta);
                true
            }
            GestureEvent::Aborted | GestureEvent::None => false,
        }
    }

    /// Ends a pointer gesture.
    ///
    /// A press that never turned into a drag is reported as [`ReleaseOutcome::Clicked`] without
    /// touching the engine; call [`Controller::click`] with the slide under the pointer.
    pub fn pointer_up(&mut self, pos: PointerPosition, now_ms: u64) -> ReleaseOutcome {
        let release = self.gesture.pointer_up(pos, now_ms);
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.resume(PauseReason::Interaction, now_ms);
        }
        if !self.c.is_dragging() {
            // The press may have frozen a tween mid-way.
            self.c.settle();
            self.animate_transition(now_ms);
            return match release {
                Some(Release::Click) => ReleaseOutcome::Clicked,
                _ => ReleaseOutcome::Ignored,
            };
        }
        let Some(release) = release else {
            return ReleaseOutcome::Ignored;
        };
        let outcome = self.c.release(release);
        match outcome {
            ReleaseOutcome::Inertia(inertia) => {
                self.inertia = Some(InertiaDriver::new(inertia));
            }
            ReleaseOutcome::Navigated { moved: true } => {
                self.animate_transition(now_ms);
                self.user_navigated(now_ms);
            }
            _ => self.animate_transition(now_ms),
        }
        adebug!(?release, ?outcome, "pointer_up");
        outcome
    }

    /// Abandons the current gesture, settling the strip if a drag was running.
    pub fn pointer_cancel(&mut self, now_ms: u64) {
        self.gesture.cancel();
        if self.c.is_dragging() {
            self.c.release(Release::Settle);
        } else {
            self.c.settle();
        }
        self.animate_transition(now_ms);
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.resume(PauseReason::Interaction, now_ms);
        }
    }

    /// Handles a wheel delta along the main axis (positive scrolls forward).
    ///
    /// Free mode moves the strip by the delta; otherwise one step is taken per debounce period.
    /// Returns `true` when the wheel was consumed.
    pub fn wheel(&mut self, delta: f32, now_ms: u64) -> bool {
        if !self.c.options().mouse_wheel || delta == 0.0 || !delta.is_finite() {
            return false;
        }
        if self.c.options().free_mode {
            self.interrupt(now_ms);
            let applied = self.c.apply_free_delta(-delta);
            return applied != 0.0;
        }
        if let Some(last) = self.last_wheel_ms {
            if now_ms.saturating_sub(last) < WHEEL_DEBOUNCE_MS {
                return true;
            }
        }
        self.last_wheel_ms = Some(now_ms);
        if delta > 0.0 {
            self.next(now_ms)
        } else {
            self.prev(now_ms)
        }
    }

    /// Handles a key press. Returns `true` when the key was consumed.
    ///
    /// Arrow keys follow the axis: left/right for horizontal (swapped in RTL), up/down for
    /// vertical.
    pub fn key(&mut self, key: Key, now_ms: u64) -> bool {
        if !self.c.options().keyboard {
            return false;
        }
        let rtl = self.c.options().direction == Direction::Rtl;
        let forward = match (self.c.options().axis, key) {
            (Axis::Horizontal, Key::ArrowRight) => !rtl,
            (Axis::Horizontal, Key::ArrowLeft) => rtl,
            (Axis::Vertical, Key::ArrowDown) => true,
            (Axis::Vertical, Key::ArrowUp) => false,
            (_, Key::Home) => {
                self.go_to(0, now_ms);
                return true;
            }
            (_, Key::End) => {
                let last = self.c.total_slides().saturating_sub(1);
                self.go_to(last, now_ms);
                return true;
            }
            _ => return false,
        };
        if forward {
            self.next(now_ms);
        } else {
            self.prev(now_ms);
        }
        true
    }

    pub fn hover(&mut self, hovered: bool, now_ms: u64) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            if hovered {
                autoplay.pause(PauseReason::Hover);
            } else {
                autoplay.resume(PauseReason::Hover, now_ms);
            }
        }
    }

    pub fn focus(&mut self, focused: bool, now_ms: u64) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            if focused {
                autoplay.pause(PauseReason::Focus);
            } else {
                autoplay.resume(PauseReason::Focus, now_ms);
            }
        }
    }

    /// Advances the controller.
    ///
    /// - If inertia is running, moves the strip one frame.
    /// - If a tween is active, samples it.
    /// - Otherwise, runs the autoplay timer (which may start a new tween).
    ///
    /// Returns the translate to render when it changed, `None` when idle.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        if let Some(driver) = self.inertia.as_mut() {
            if !driver.frame(&mut self.c) {
                self.inertia = None;
                self.animate_transition(now_ms);
            }
            return Some(self.visual_translate(now_ms));
        }

        if let Some(tween) = self.tween {
            let v = tween.sample(now_ms);
            if tween.is_done(now_ms) {
                self.tween = None;
            }
            return Some(v);
        }

        if self.gesture.phase() != GesturePhase::Idle {
            return None;
        }
        let step = self.autoplay.as_mut()?.tick(now_ms)?;
        adebug!(?step, "autoplay step");
        match step {
            AutoplayStep::Next => self.c.slide_next(),
            AutoplayStep::Prev => self.c.slide_prev(),
        };
        self.animate_transition(now_ms);
        Some(self.visual_translate(now_ms))
    }
}
