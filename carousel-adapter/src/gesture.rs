//! Pointer gesture state machine: press, axis lock, drag, release classification.
//!
//! Distances are in logical pixels, durations in milliseconds.

use carousel::{AxisGeometry, PointerPosition, Release};

/// Movement needed before a press turns into a drag (or is handed to a cross-axis scroll).
pub const AXIS_LOCK_THRESHOLD: f32 = 8.0;
/// Releases closer than this to the press position count as clicks.
pub const CLICK_MAX_DISTANCE: f32 = 5.0;
/// Flicks must be faster than this to count as swipes...
pub const SWIPE_MAX_DURATION_MS: u64 = 200;
/// ...and travel further than this.
pub const SWIPE_MIN_DISTANCE: f32 = 15.0;
/// Velocities are expressed per frame of this length.
pub const FRAME_MS: f32 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GesturePhase {
    /// No pointer down, or the gesture was handed to a cross-axis scroll.
    #[default]
    Idle,
    /// Pointer down, not yet past the axis-lock threshold.
    Armed,
    /// Locked onto the main axis.
    Dragging,
}

/// What a pointer move means for the carousel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Nothing to do.
    None,
    /// The gesture locked onto the main axis. Start a drag, then apply `delta`.
    DragStart { delta: f32 },
    /// Apply `delta` to the running drag.
    Drag { delta: f32 },
    /// Cross-axis movement won; the gesture is abandoned.
    Aborted,
}

/// Tracks one pointer gesture and classifies how it ends.
///
/// Deltas are reported in translate space (see [`AxisGeometry::main_axis_delta`]), so they can
/// be fed to [`carousel::Carousel::drag_by`] as is.
#[derive(Clone, Copy, Debug)]
pub struct GestureTracker {
    geometry: AxisGeometry,
    phase: GesturePhase,
    start: PointerPosition,
    start_ms: u64,
    last: PointerPosition,
    last_ms: u64,
    /// Translate px per frame, from the most recent move.
    velocity: f32,
}

impl GestureTracker {
    pub fn new(geometry: AxisGeometry) -> Self {
        Self {
            geometry,
            phase: GesturePhase::Idle,
            start: PointerPosition::default(),
            start_ms: 0,
            last: PointerPosition::default(),
            last_ms: 0,
            velocity: 0.0,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Call when the carousel's axis or direction changes.
    pub fn set_geometry(&mut self, geometry: AxisGeometry) {
        self.geometry = geometry;
    }

    pub fn pointer_down(&mut self, pos: PointerPosition, now_ms: u64) {
        self.phase = GesturePhase::Armed;
        self.start = pos;
        self.start_ms = now_ms;
        self.last = pos;
        self.last_ms = now_ms;
        self.velocity = 0.0;
    }

    pub fn pointer_move(&mut self, pos: PointerPosition, now_ms: u64) -> GestureEvent {
        match self.phase {
            GesturePhase::Idle => GestureEvent::None,
            GesturePhase::Armed => {
                let main = self.geometry.main_axis_delta(self.start, pos);
                let cross = self.geometry.cross_axis_delta(self.start, pos).abs();
                if main.abs().max(cross) < AXIS_LOCK_THRESHOLD {
                    return GestureEvent::None;
                }
                if cross > main.abs() {
                    atrace!(main, cross, "gesture aborted");
                    self.phase = GesturePhase::Idle;
                    return GestureEvent::Aborted;
                }
                self.phase = GesturePhase::Dragging;
                self.track(main, pos, now_ms);
                GestureEvent::DragStart { delta: main }
            }
            GesturePhase::Dragging => {
                let delta = self.geometry.main_axis_delta(self.last, pos);
                self.track(delta, pos, now_ms);
                GestureEvent::Drag { delta }
            }
        }
    }

    fn track(&mut self, delta: f32, pos: PointerPosition, now_ms: u64) {
        let dt = now_ms.saturating_sub(self.last_ms);
        if dt > 0 {
            self.velocity = delta / dt as f32 * FRAME_MS;
        }
        self.last = pos;
        self.last_ms = now_ms;
    }

    /// Ends the gesture. Returns `None` when no gesture was in progress.
    ///
    /// A press that never locked onto the axis always ends as a click.
    pub fn pointer_up(&mut self, pos: PointerPosition, now_ms: u64) -> Option<Release> {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            GesturePhase::Idle => None,
            GesturePhase::Armed => Some(Release::Click),
            GesturePhase::Dragging => {
                let distance = self.geometry.main_axis_delta(self.start, pos);
                let duration = now_ms.saturating_sub(self.start_ms);
                let release = if distance.abs() < CLICK_MAX_DISTANCE {
                    Release::Click
                } else if duration < SWIPE_MAX_DURATION_MS && distance.abs() > SWIPE_MIN_DISTANCE {
                    Release::Swipe {
                        velocity: self.release_velocity(distance, duration),
                    }
                } else {
                    Release::Settle
                };
                atrace!(distance, duration, ?release, "gesture released");
                Some(release)
            }
        }
    }

    /// Abandons the gesture without a release (e.g. pointer capture lost).
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
        self.velocity = 0.0;
    }

    fn release_velocity(&self, distance: f32, duration: u64) -> f32 {
        // The last sample may point backwards after jitter.
        if self.velocity != 0.0 && self.velocity.signum() == distance.signum() {
            self.velocity
        } else {
            distance / duration.max(1) as f32 * FRAME_MS
        }
    }
}
