//! A headless carousel layout and navigation engine.
//!
//! For adapter-level utilities (gestures, inertia, autoplay, tweens), see the `carousel-adapter`
//! crate.
//!
//! This crate focuses on the core algorithms behind a slide carousel: snap positions and bounds
//! derived from slide sizes, step/loop/rewind navigation, an infinite-loop slot permutation that
//! moves slides between the strip edges without visual jumps, and a virtual window that keeps the
//! number of rendered slides bounded.
//!
//! It is UI-agnostic. A view layer is expected to provide:
//! - the container size (width or height, depending on the axis)
//! - slide sizes (optionally; estimates are used until measured)
//! - user intents: prev/next, clicks, drag deltas and releases
//!
//! and to render the strip at [`Carousel::translate`] with the slides in
//! [`Carousel::dom_order`].
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod axis;
mod carousel;
mod events;
mod fenwick;
mod layout;
mod loop_window;
mod navigation;
mod options;
mod physics;
mod sizes;
mod state;
mod types;
mod virtual_window;


pub use axis::{AxisGeometry, Measure};
pub use carousel::Carousel;
pub use events::CarouselEvent;
pub use layout::{Layout, SlideSnap};
pub use loop_window::{InsertOutcome, LOOP_EDGE_BUFFER, LoopWindow};
pub use navigation::{
    NavigationInput, calculate_new_position, resolve_goto, resolve_rewind, skip_disabled,
};
pub use options::{
    AutoplayOptions, Breakpoint, BreakpointOverrides, CarouselOptions, EventCallback, PeekEdges,
};
pub use physics::{
    EDGE_FRICTION, FRICTION, Inertia, MIN_VELOCITY, RESISTANCE_FACTOR, Release, ReleaseOutcome,
};
pub use state::{RenderState, RenderedSlide, SlideAttributes, Transition};
pub use types::{
    Axis, Bounds, Direction, IndexRange, NavigationTrigger, PointerPosition, ScrollExtent,
    SlidesPerView, Travel, positive_modulo,
};
pub use virtual_window::VirtualWindow;
