//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and only deals with layout, navigation and state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A pointer gesture state machine that turns raw pointer events into drags and releases
//! - Cancelable free-mode inertia driven one frame at a time
//! - A pausable autoplay timer
//! - Tween-based transitions between snaps
//! - A [`Controller`] tying them together through `tick(now_ms)`
//!
//! Timestamps are plain `u64` milliseconds supplied by the caller; nothing here reads a clock.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod autoplay;
mod controller;
mod gesture;
mod inertia;
mod tween;

#[cfg(test)]
mod tests;

pub use autoplay::{Autoplay, AutoplayStep, PauseReason};
pub use controller::{Controller, Key};
pub use gesture::{
    AXIS_LOCK_THRESHOLD, CLICK_MAX_DISTANCE, FRAME_MS, GestureEvent, GesturePhase,
    GestureTracker, SWIPE_MAX_DURATION_MS, SWIPE_MIN_DISTANCE,
};
pub use inertia::{CancellationToken, InertiaDriver};
pub use tween::{Easing, Tween};
