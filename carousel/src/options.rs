use std::collections::BTreeSet;
use std::sync::Arc;

use crate::carousel::Carousel;
use crate::{Axis, CarouselEvent, Direction, SlidesPerView};

/// A callback fired for every committed [`CarouselEvent`].
///
/// Events raised inside one engine call are delivered after the call has committed its state,
/// so the callback always observes a consistent carousel.
pub type EventCallback = Arc<dyn Fn(&Carousel, &CarouselEvent) + Send + Sync>;

/// Lets neighbouring slides peek in at both edges of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeekEdges {
    /// Peek size in pixels.
    pub absolute: f32,
    /// Peek size as a fraction of the container size, in `[0, 1]`.
    pub relative: f32,
}

impl PeekEdges {
    pub fn absolute(px: f32) -> Self {
        Self {
            absolute: px,
            relative: 0.0,
        }
    }

    pub fn relative(fraction: f32) -> Self {
        Self {
            absolute: 0.0,
            relative: fraction,
        }
    }

    /// The peek size in pixels for a given container size.
    pub fn resolve(&self, container_size: f32) -> f32 {
        (self.absolute + self.relative * container_size).max(0.0)
    }
}

/// Autoplay configuration. The timer itself lives in the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoplayOptions {
    pub delay_ms: u64,
    pub pause_on_hover: bool,
    pub pause_on_focus: bool,
    /// Play backwards (`slide_prev`) instead of forwards.
    pub reverse: bool,
    /// Stop for good once the user interacts with the carousel.
    pub stop_on_interaction: bool,
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            pause_on_hover: true,
            pause_on_focus: true,
            reverse: false,
            stop_on_interaction: false,
        }
    }
}

/// Options patched in when the container reaches a minimum size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointOverrides {
    pub slides_per_view: Option<SlidesPerView>,
    pub space_between: Option<f32>,
    pub step_slides: Option<usize>,
    pub center: Option<bool>,
    pub margin_start: Option<f32>,
    pub margin_end: Option<f32>,
    pub peek_edges: Option<PeekEdges>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    pub min_container_size: f32,
    pub overrides: BreakpointOverrides,
}

/// Configuration for [`crate::Carousel`].
///
/// Cheap to clone: the only heavy field (`on_event`) is an `Arc`.
#[derive(Clone)]
pub struct CarouselOptions {
    /// Explicit slide count. When zero, the count reported by
    /// [`crate::Carousel::set_element_count`] is used instead.
    pub slide_count: usize,
    pub slides_per_view: SlidesPerView,
    /// Gap between slides.
    pub space_between: f32,
    pub margin_start: f32,
    pub margin_end: f32,
    pub step_slides: usize,
    pub looping: bool,
    /// Jump back to the first slide after the last one (and vice versa). Ignored when looping.
    pub rewind: bool,
    pub center: bool,
    /// With `center`, keep the strip inside its plain bounds instead of centering edge slides.
    pub not_center_bounds: bool,
    pub free_mode: bool,
    pub draggable: bool,
    pub resistance: bool,
    pub virtualized: bool,
    /// Extra slides rendered on each side in virtual mode, as a multiple of `slides_per_view`.
    pub virtual_buffer: f32,
    pub direction: Direction,
    pub axis: Axis,
    pub peek_edges: Option<PeekEdges>,
    pub autoplay: Option<AutoplayOptions>,
    pub slide_on_click: bool,
    pub disabled_slides: BTreeSet<usize>,
    pub initial_slide: usize,
    /// Drag sensitivity: pointer delta is multiplied by this before being applied.
    pub touch_ratio: f32,
    /// Transition duration used by adapters when animating to a new snap.
    pub speed_ms: u64,
    pub mouse_wheel: bool,
    pub keyboard: bool,
    pub breakpoints: Vec<Breakpoint>,
    pub on_event: Option<EventCallback>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CarouselOptions {
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            slides_per_view: SlidesPerView::default(),
            space_between: 0.0,
            margin_start: 0.0,
            margin_end: 0.0,
            step_slides: 1,
            looping: false,
            rewind: false,
            center: false,
            not_center_bounds: false,
            free_mode: false,
            draggable: true,
            resistance: true,
            virtualized: false,
            virtual_buffer: 1.0,
            direction: Direction::Ltr,
            axis: Axis::Horizontal,
            peek_edges: None,
            autoplay: None,
            slide_on_click: false,
            disabled_slides: BTreeSet::new(),
            initial_slide: 0,
            touch_ratio: 1.0,
            speed_ms: 300,
            mouse_wheel: false,
            keyboard: true,
            breakpoints: Vec::new(),
            on_event: None,
        }
    }

    pub fn with_slides_per_view(mut self, slides_per_view: SlidesPerView) -> Self {
        self.slides_per_view = slides_per_view;
        self
    }

    pub fn with_space_between(mut self, space_between: f32) -> Self {
        self.space_between = space_between;
        self
    }

    pub fn with_margins(mut self, margin_start: f32, margin_end: f32) -> Self {
        self.margin_start = margin_start;
        self.margin_end = margin_end;
        self
    }

    pub fn with_step_slides(mut self, step_slides: usize) -> Self {
        self.step_slides = step_slides;
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_rewind(mut self, rewind: bool) -> Self {
        self.rewind = rewind;
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn with_not_center_bounds(mut self, not_center_bounds: bool) -> Self {
        self.not_center_bounds = not_center_bounds;
        self
    }

    pub fn with_free_mode(mut self, free_mode: bool) -> Self {
        self.free_mode = free_mode;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn with_resistance(mut self, resistance: bool) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn with_virtual(mut self, virtualized: bool, virtual_buffer: f32) -> Self {
        self.virtualized = virtualized;
        self.virtual_buffer = virtual_buffer;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_peek_edges(mut self, peek_edges: Option<PeekEdges>) -> Self {
        self.peek_edges = peek_edges;
        self
    }

    pub fn with_autoplay(mut self, autoplay: Option<AutoplayOptions>) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_slide_on_click(mut self, slide_on_click: bool) -> Self {
        self.slide_on_click = slide_on_click;
        self
    }

    pub fn with_disabled_slides(mut self, disabled: impl IntoIterator<Item = usize>) -> Self {
        self.disabled_slides = disabled.into_iter().collect();
        self
    }

    pub fn with_initial_slide(mut self, initial_slide: usize) -> Self {
        self.initial_slide = initial_slide;
        self
    }

    pub fn with_touch_ratio(mut self, touch_ratio: f32) -> Self {
        self.touch_ratio = touch_ratio;
        self
    }

    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    pub fn with_mouse_wheel(mut self, mouse_wheel: bool) -> Self {
        self.mouse_wheel = mouse_wheel;
        self
    }

    pub fn with_keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn with_breakpoint(mut self, min_container_size: f32, overrides: BreakpointOverrides) -> Self {
        self.breakpoints.push(Breakpoint {
            min_container_size,
            overrides,
        });
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(&Carousel, &CarouselEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled_slides.contains(&index)
    }

    /// Rewind only applies to bounded carousels.
    pub fn rewinds(&self) -> bool {
        self.rewind && !self.looping
    }

    /// Returns a copy with every out-of-range value clamped into its valid range.
    ///
    /// Invalid values are never fatal; each correction is reported through `cwarn!`.
    pub fn sanitized(&self) -> Self {
        let mut o = self.clone();

        if o.step_slides == 0 {
            cwarn!("step_slides must be >= 1, using 1");
            o.step_slides = 1;
        }
        if let SlidesPerView::Count(n) = o.slides_per_view {
            if !(n.is_finite() && n > 0.0) {
                cwarn!(slides_per_view = n, "slides_per_view must be > 0, using 1");
                o.slides_per_view = SlidesPerView::Count(1.0);
            }
        }
        o.space_between = non_negative(o.space_between, "space_between");
        o.margin_start = finite(o.margin_start, "margin_start");
        o.margin_end = finite(o.margin_end, "margin_end");
        o.virtual_buffer = non_negative(o.virtual_buffer, "virtual_buffer");
        if !(o.touch_ratio.is_finite() && o.touch_ratio > 0.0) {
            cwarn!(touch_ratio = o.touch_ratio, "touch_ratio must be > 0, using 1");
            o.touch_ratio = 1.0;
        }
        if let Some(peek) = o.peek_edges.as_mut() {
            if !(0.0..=1.0).contains(&peek.relative) {
                cwarn!(
                    relative = peek.relative,
                    "peek_edges.relative must be within [0, 1], clamping"
                );
                peek.relative = if peek.relative.is_nan() {
                    0.0
                } else {
                    peek.relative.clamp(0.0, 1.0)
                };
            }
            peek.absolute = non_negative(peek.absolute, "peek_edges.absolute");
        }
        if o.rewind && o.looping {
            cwarn!("rewind has no effect together with loop");
        }
        o
    }

    /// Applies every breakpoint whose `min_container_size` fits, smallest first.
    pub fn resolve_for(&self, container_size: f32) -> Self {
        let mut o = self.clone();
        if o.breakpoints.is_empty() {
            return o;
        }
        let mut matching: Vec<&Breakpoint> = self
            .breakpoints
            .iter()
            .filter(|bp| bp.min_container_size <= container_size)
            .collect();
        matching.sort_by(|a, b| a.min_container_size.total_cmp(&b.min_container_size));
        for bp in matching {
            let ov = &bp.overrides;
            if let Some(v) = ov.slides_per_view {
                o.slides_per_view = v;
            }
            if let Some(v) = ov.space_between {
                o.space_between = v;
            }
            if let Some(v) = ov.step_slides {
                o.step_slides = v;
            }
            if let Some(v) = ov.center {
                o.center = v;
            }
            if let Some(v) = ov.margin_start {
                o.margin_start = v;
            }
            if let Some(v) = ov.margin_end {
                o.margin_end = v;
            }
            if let Some(v) = ov.peek_edges {
                o.peek_edges = Some(v);
            }
        }
        o
    }
}

fn non_negative(v: f32, _name: &str) -> f32 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        cwarn!(option = _name, value = v, "value must be finite and >= 0, using 0");
        0.0
    }
}

fn finite(v: f32, _name: &str) -> f32 {
    if v.is_finite() {
        v
    } else {
        cwarn!(option = _name, value = v, "value must be finite, using 0");
        0.0
    }
}

impl core::fmt::Debug for CarouselOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("slide_count", &self.slide_count)
            .field("slides_per_view", &self.slides_per_view)
            .field("space_between", &self.space_between)
            .field("margin_start", &self.margin_start)
            .field("margin_end", &self.margin_end)
            .field("step_slides", &self.step_slides)
            .field("looping", &self.looping)
            .field("rewind", &self.rewind)
            .field("center", &self.center)
            .field("not_center_bounds", &self.not_center_bounds)
            .field("free_mode", &self.free_mode)
            .field("virtualized", &self.virtualized)
            .field("virtual_buffer", &self.virtual_buffer)
            .field("direction", &self.direction)
            .field("axis", &self.axis)
            .field("peek_edges", &self.peek_edges)
            .field("disabled_slides", &self.disabled_slides)
            .field("initial_slide", &self.initial_slide)
            .finish_non_exhaustive()
    }
}
