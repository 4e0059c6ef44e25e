//! Drag handling, release resolution and free-mode inertia.

use crate::{Carousel, NavigationTrigger, Transition, Travel};

/// Fraction of an out-of-bounds excursion that is applied while resistance is on.
pub const RESISTANCE_FACTOR: f32 = 0.5;
/// Per-frame velocity decay.
pub const FRICTION: f32 = 0.93;
/// Per-frame velocity decay while the strip rests against a bound.
pub const EDGE_FRICTION: f32 = 0.8;
/// Inertia stops below this speed, in px per frame.
pub const MIN_VELOCITY: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DragState {
    /// Translate at drag start, shifted by every window compensation since.
    origin: f32,
    /// Scaled pointer movement since drag start.
    accumulated: f32,
    /// The strip was pulled past a bound and must snap back on release.
    has_extra: bool,
}

impl DragState {
    pub(crate) fn shift_origin(&mut self, delta: f32) {
        self.origin += delta;
    }
}

/// How a gesture ended, as classified by the adapter's gesture tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Release {
    /// Barely moved: leave the decision to the click handler.
    Click,
    /// A fast flick. `velocity` is in translate px per frame; negative moves forward.
    Swipe { velocity: f32 },
    /// Drag without a flick: snap to the nearest slide.
    Settle,
}

/// What the engine did with a [`Release`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// No drag was in progress.
    Ignored,
    /// Treated as a click; the strip went back to its pre-drag snap.
    Clicked,
    /// A swipe navigated (or bounced off an edge when `moved` is false).
    Navigated { moved: bool },
    /// The strip settled on `index`.
    Settled { index: usize },
    /// Free-mode swipe: drive the returned inertia once per frame.
    Inertia(Inertia),
}

impl Carousel {
    /// Starts a drag. Returns `false` when dragging is disabled or there are no slides.
    pub fn begin_drag(&mut self) -> bool {
        if !self.options().draggable || self.current_position().is_none() {
            return false;
        }
        ctrace!(translate = self.translate(), "begin_drag");
        self.drag = Some(DragState {
            origin: self.translate(),
            accumulated: 0.0,
            has_extra: false,
        });
        true
    }

    /// Applies pointer movement (translate space, see [`crate::AxisGeometry::main_axis_delta`]).
    pub fn drag_by(&mut self, delta: f32) {
        let Some(mut drag) = self.drag else {
            return;
        };
        if !delta.is_finite() {
            return;
        }
        drag.accumulated += delta * self.options().touch_ratio;
        let raw = drag.origin + drag.accumulated;

        let layout = self.layout();
        let (translate, has_extra) = if layout.looping {
            (raw, false)
        } else {
            let min = layout.min_translate;
            let max = layout.effective_max_translate();
            let resistance = self.options().resistance;
            if raw > min {
                if resistance {
                    (min + (raw - min) * RESISTANCE_FACTOR, true)
                } else {
                    (min, false)
                }
            } else if raw < max {
                if resistance {
                    (max + (raw - max) * RESISTANCE_FACTOR, true)
                } else {
                    (max, false)
                }
            } else {
                (raw, false)
            }
        };
        drag.has_extra = has_extra;
        self.set_raw_translate(translate);

        let compensation = self.follow_translate();
        drag.origin += compensation;
        self.drag = Some(drag);
    }

    /// Ends the drag.
    pub fn release(&mut self, release: Release) -> ReleaseOutcome {
        let Some(drag) = self.drag.take() else {
            return ReleaseOutcome::Ignored;
        };
        let release = match release {
            Release::Click if drag.has_extra => Release::Settle,
            other => other,
        };
        ctrace!(?release, has_extra = drag.has_extra, "release");

        let outcome = match release {
            Release::Click => {
                if let Some(p) = self.current_position() {
                    self.commit_navigation(p, NavigationTrigger::Translation, Travel::Nearest);
                }
                ReleaseOutcome::Clicked
            }
            Release::Swipe { velocity } if self.options().free_mode => {
                if drag.has_extra {
                    self.settle_free()
                } else {
                    ReleaseOutcome::Inertia(Inertia::new(velocity))
                }
            }
            Release::Swipe { velocity } => {
                let forward = velocity < 0.0;
                ReleaseOutcome::Navigated {
                    moved: self.step(forward),
                }
            }
            Release::Settle if self.options().free_mode => self.settle_free(),
            Release::Settle => self.settle_nearest(),
        };
        self.finish();
        outcome
    }

    /// Puts the strip back on the active slide's snap (inside the bounds in free mode).
    ///
    /// For adapters that interrupted an animation and then did not start a drag.
    pub fn settle(&mut self) {
        if self.drag.is_some() {
            return;
        }
        if self.options().free_mode {
            self.settle_free();
        } else if let Some(p) = self.current_position() {
            self.commit_navigation(p, NavigationTrigger::Translation, Travel::Nearest);
        }
        self.finish();
    }

    fn settle_nearest(&mut self) -> ReleaseOutcome {
        let layout = self.layout();
        let current = self.current_position().unwrap_or(0);
        let target = match layout.nearest_index(self.translate()) {
            Some(i) if !self.options().is_disabled(i) => i,
            _ => current,
        };
        self.commit_navigation(target, NavigationTrigger::Translation, Travel::Nearest);
        ReleaseOutcome::Settled { index: target }
    }

    /// Free mode: the strip stays where it is, pulled back inside the bounds if needed.
    pub(crate) fn settle_free(&mut self) -> ReleaseOutcome {
        let from_index = self.current_position();
        let before = self.translate();
        let clamped = self.layout().clamp_translate(before);
        self.set_raw_translate(clamped);
        let compensation = self.follow_translate();
        self.set_position_from_translate();
        if let Some(to_index) = self.current_position() {
            self.record_transition(Transition {
                from_index,
                to_index,
                from_translate: before + compensation,
                to_translate: self.translate(),
            });
        }
        ReleaseOutcome::Settled {
            index: self.current_position().unwrap_or(0),
        }
    }

    /// Moves the strip by `delta` in free mode (wheel, inertia). Returns the applied delta.
    pub fn apply_free_delta(&mut self, delta: f32) -> f32 {
        if self.current_position().is_none() || !delta.is_finite() {
            return 0.0;
        }
        let before = self.translate();
        let next = self.layout().clamp_translate(before + delta);
        self.set_raw_translate(next);
        let compensation = self.follow_translate();
        self.set_position_from_translate();
        self.finish();
        self.translate() - compensation - before
    }
}

/// Velocity-decayed free-mode glide, advanced one frame at a time by the adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inertia {
    velocity: f32,
    finished: bool,
}

impl Inertia {
    pub fn new(velocity: f32) -> Self {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        Self {
            velocity,
            finished: false,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one frame. Returns `false` once the glide has stopped and the carousel settled.
    pub fn step(&mut self, carousel: &mut Carousel) -> bool {
        if self.finished {
            return false;
        }
        let friction = if carousel.is_at_edge() {
            EDGE_FRICTION
        } else {
            FRICTION
        };
        self.velocity *= friction;
        if self.velocity.abs() < MIN_VELOCITY {
            self.finished = true;
            carousel.settle_free();
            carousel.finish();
            return false;
        }
        let applied = carousel.apply_free_delta(self.velocity);
        if applied.abs() < f32::EPSILON {
            // Pinned against a bound.
            self.velocity *= EDGE_FRICTION;
        }
        true
    }
}
