use std::collections::BTreeSet;

use crate::axis::{AxisGeometry, Measure};
use crate::events::ImageReadiness;
use crate::layout::{self, EPSILON, Layout, LayoutInput};
use crate::loop_window::{LoopMetrics, LoopWindow};
use crate::navigation::{
    NavigationInput, calculate_new_position, resolve_goto, resolve_rewind,
};
use crate::physics::DragState;
use crate::sizes::SlideSizes;
use crate::types::positive_modulo;
use crate::virtual_window::{VirtualWindow, WindowParams};
use crate::{
    CarouselEvent, CarouselOptions, NavigationTrigger, RenderState, RenderedSlide,
    SlideAttributes, SlidesPerView, Transition, Travel,
};

/// Eager-loading radius used when slides keep their own size.
const AUTO_EAGER_RADIUS: isize = 6;

/// A headless carousel engine.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by reporting the container size, slide sizes and user intents
///   (`slide_next`, drags, clicks).
/// - Rendering is exposed as plain data: the strip `translate`, the DOM order of rendered slides
///   and a serializable [`RenderState`].
///
/// Every mutator completes synchronously. Events raised during a call are delivered to
/// [`CarouselOptions::on_event`] after the call has committed its state.
///
/// For gestures, inertia, autoplay and tweens, see the `carousel-adapter` crate.
#[derive(Clone, Debug)]
pub struct Carousel {
    base_options: CarouselOptions,
    options: CarouselOptions, // resolved for the container size, sanitized
    geometry: AxisGeometry,
    container_size: f32,
    element_count: usize,

    sizes: SlideSizes,
    position: Option<usize>,
    real_position: f32,
    translate: f32,
    loop_window: LoopWindow,
    virtual_window: VirtualWindow,
    pub(crate) drag: Option<DragState>,

    reached_start: bool,
    reached_end: bool,
    images: ImageReadiness,
    last_transition: Option<Transition>,

    batch_depth: usize,
    pending_events: Vec<CarouselEvent>,
}

impl Carousel {
    pub fn new(options: CarouselOptions) -> Self {
        let resolved = options.resolve_for(0.0).sanitized();
        cdebug!(
            slide_count = resolved.slide_count,
            looping = resolved.looping,
            virtualized = resolved.virtualized,
            "Carousel::new"
        );
        let mut c = Self {
            geometry: AxisGeometry::new(resolved.axis, resolved.direction),
            container_size: 0.0,
            element_count: 0,
            sizes: SlideSizes::new(0),
            position: None,
            real_position: 0.0,
            translate: 0.0,
            loop_window: LoopWindow::new(0),
            virtual_window: VirtualWindow::default(),
            drag: None,
            reached_start: false,
            reached_end: false,
            images: ImageReadiness::default(),
            last_transition: None,
            batch_depth: 0,
            pending_events: Vec::new(),
            base_options: options,
            options: resolved,
        };
        c.relayout();
        c.flush_events();
        c
    }

    /// Effective options: base options with matching breakpoints applied, sanitized.
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Options as passed by the caller.
    pub fn base_options(&self) -> &CarouselOptions {
        &self.base_options
    }

    pub fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    pub fn set_options(&mut self, options: CarouselOptions) {
        let prev_looping = self.options.looping;
        let prev_virtualized = self.options.virtualized;
        let prev_total = self.total_slides();
        self.base_options = options;
        self.resolve_options();
        cdebug!(
            slide_count = self.options.slide_count,
            looping = self.options.looping,
            virtualized = self.options.virtualized,
            "Carousel::set_options"
        );
        if self.options.looping != prev_looping
            || self.options.virtualized != prev_virtualized
            || self.total_slides() != prev_total
        {
            self.loop_window = LoopWindow::new(self.total_slides());
            self.virtual_window = VirtualWindow::default();
            self.drag = None;
        }
        self.relayout();
        self.flush_events();
    }

    /// Clones the current base options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CarouselOptions)) {
        let mut next = self.base_options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_event(
        &mut self,
        on_event: Option<impl Fn(&Carousel, &CarouselEvent) + Send + Sync + 'static>,
    ) {
        let base = self.base_options.clone().with_on_event(on_event);
        self.options.on_event = base.on_event.clone();
        self.base_options = base;
    }

    fn resolve_options(&mut self) {
        self.options = self
            .base_options
            .resolve_for(self.container_size)
            .sanitized();
        self.geometry = AxisGeometry::new(self.options.axis, self.options.direction);
    }

    /// Batches several updates; events raised inside `f` are delivered once it returns.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        self.flush_events();
    }

    fn emit(&mut self, event: CarouselEvent) {
        ctrace!(?event, "queued event");
        self.pending_events.push(event);
    }

    fn flush_events(&mut self) {
        if self.batch_depth > 0 || self.pending_events.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending_events);
        if let Some(cb) = self.options.on_event.clone() {
            for event in &events {
                cb(self, event);
            }
        }
    }

    /// Slide count: the explicit `slide_count` when non-zero, else the reported element count.
    pub fn total_slides(&self) -> usize {
        if self.options.slide_count > 0 {
            self.options.slide_count
        } else {
            self.element_count
        }
    }

    pub fn container_size(&self) -> f32 {
        self.container_size
    }

    pub fn set_container_size(&mut self, container_size: f32) {
        let size = if container_size.is_finite() {
            container_size.max(0.0)
        } else {
            0.0
        };
        if (size - self.container_size).abs() <= f32::EPSILON {
            return;
        }
        ctrace!(size, "Carousel::set_container_size");
        self.container_size = size;
        self.resolve_options();
        self.relayout();
        self.flush_events();
    }

    /// Reports how many slide elements the view currently holds.
    ///
    /// Only used as the slide count when `slide_count` is zero.
    pub fn set_element_count(&mut self, count: usize) {
        if self.element_count == count {
            return;
        }
        self.element_count = count;
        if self.options.slide_count == 0 {
            self.relayout();
            self.flush_events();
        }
    }

    /// Records the measured main-axis size of a slide (logical index).
    pub fn measure(&mut self, index: usize, size: f32) {
        if self.sizes.measure(index, size) {
            self.relayout();
            self.flush_events();
        }
    }

    pub fn measure_many(&mut self, sizes: impl IntoIterator<Item = (usize, f32)>) {
        let mut changed = false;
        for (index, size) in sizes {
            changed |= self.sizes.measure(index, size);
        }
        if changed {
            self.relayout();
            self.flush_events();
        }
    }

    /// Pulls the container size, element count and rendered slide sizes from `m`.
    pub fn measure_with(&mut self, m: &impl Measure) {
        self.batch_update(|c| {
            let container = c.geometry.container_size(m.container_rect().as_ref());
            c.set_element_count(m.element_count());
            c.set_container_size(container);
            let dom_order = c.dom_order();
            let measured: Vec<(usize, f32)> = dom_order
                .iter()
                .enumerate()
                .filter_map(|(dom_index, &index)| {
                    let rect = m.slide_rect(dom_index)?;
                    Some((index, c.geometry.rect_size(&rect)))
                })
                .collect();
            c.measure_many(measured);
        });
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.sizes.is_measured(index)
    }

    pub fn measured_count(&self) -> usize {
        self.sizes.measured_count()
    }

    pub fn reset_measurements(&mut self) {
        self.sizes.clear_measurements();
        self.relayout();
        self.flush_events();
    }

    /// Main-axis size of a slide, falling back to an estimate when it was never measured.
    pub fn slide_size(&self, index: usize) -> f32 {
        self.sizes.size(index)
    }

    /// Re-derives everything from the current options, sizes and position.
    ///
    /// The active slide keeps its place: outside free mode and drags the strip snaps back to it.
    fn relayout(&mut self) {
        let total = self.total_slides();
        let before = self.translate;
        let offset_from_snap = self
            .position
            .and_then(|p| self.layout().snap_translate(p))
            .map_or(0.0, |snap| self.translate - snap);

        self.sizes.resize(total);
        self.sizes.set_container(self.container_size);
        self.sizes
            .set_fixed(layout::fixed_slide_size(&self.options, self.container_size));
        if self.loop_window.len() != total {
            self.loop_window = LoopWindow::new(total);
        }

        if total == 0 {
            self.position = None;
            self.real_position = 0.0;
            self.translate = 0.0;
            self.virtual_window = VirtualWindow::default();
            self.drag = None;
            self.reached_start = false;
            self.reached_end = false;
            return;
        }

        let mut p = self
            .position
            .unwrap_or(self.options.initial_slide)
            .min(total - 1);
        if !self.options.looping {
            let (first, last) = self.anchors();
            p = p.clamp(first, last.max(first));
        }
        self.position = Some(p);

        self.virtual_window = if self.options.virtualized {
            VirtualWindow::around(p, &self.window_params())
        } else {
            VirtualWindow::default()
        };
        if self.options.looping && !self.options.virtualized {
            self.initialize_loop(p);
        }

        let keep = self.drag.is_some() || self.options.free_mode;
        let layout = self.layout();
        let snap = layout.snap_translate(p).unwrap_or(0.0);
        if keep {
            self.translate = layout.clamp_translate(snap + offset_from_snap);
            self.real_position = layout.real_position(self.translate, total);
        } else {
            self.translate = snap;
            self.real_position = p as f32;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.shift_origin(self.translate - before);
        }
        self.update_reached(false);

        if !self.images.is_ready() {
            let eager = self.eager_indices();
            self.images.set_expected(eager);
            if self.images.check() {
                self.emit(CarouselEvent::ImagesReady);
            }
        }
    }

    /// Rotates the loop permutation so the active slide starts out with neighbours on both sides.
    fn initialize_loop(&mut self, position: usize) {
        let fill = self.loop_fill(position);
        let mut scratch = 0.0;
        let m = LoopMetrics {
            sizes: &self.sizes,
            gap: self.options.space_between,
            container: self.container_size,
        };
        self.loop_window.by_slide_to(position, fill, &mut scratch, &m);
        debug_assert!(is_permutation(&self.loop_window.order()));
    }

    /// Pixels the strip must cover before and after the start of `target` once it is active.
    fn loop_fill(&self, target: usize) -> (f32, f32) {
        let c = self.container_size;
        let mut lead = self.options.margin_start + layout::peek_px(&self.options, c);
        if self.options.center {
            lead += c / 2.0 - self.sizes.size(target) / 2.0;
        }
        (lead.max(0.0), (c - lead).max(0.0))
    }

    pub(crate) fn window_params(&self) -> WindowParams {
        WindowParams {
            total: self.total_slides(),
            slides_per_view: layout::effective_slides_per_view(
                &self.options,
                self.container_size,
                &self.sizes,
            ),
            buffer: self.options.virtual_buffer,
            center: self.options.center,
            looping: self.options.looping,
        }
    }

    /// Derived geometry for the current state. Recomputed on every call.
    pub fn layout(&self) -> Layout {
        let dom_order = self.dom_order();
        let origin = if self.options.virtualized && !self.options.looping {
            self.sizes
                .offset_of(self.virtual_window.start, self.options.space_between)
        } else {
            0.0
        };
        Layout::compute(LayoutInput {
            options: &self.options,
            container: self.container_size,
            sizes: &self.sizes,
            dom_order: &dom_order,
            origin,
        })
    }

    pub fn min_translate(&self) -> f32 {
        self.layout().min_translate
    }

    pub fn max_translate(&self) -> f32 {
        self.layout().max_translate
    }

    /// First and last legal resting positions.
    pub fn anchors(&self) -> (usize, usize) {
        layout::anchors(&self.options, self.container_size, &self.sizes)
    }

    /// The active slide, or `None` when there are no slides.
    pub fn current_position(&self) -> Option<usize> {
        self.position
    }

    /// Fractional position of the strip, e.g. `2.5` halfway between slides 2 and 3.
    pub fn current_real_position(&self) -> f32 {
        self.real_position
    }

    pub fn translate(&self) -> f32 {
        self.translate
    }

    pub fn transform_string(&self) -> String {
        self.geometry.transform_string(self.translate)
    }

    /// The loop permutation: `slide_order()[dom_index] == logical index`.
    ///
    /// Identity outside loop mode.
    pub fn slide_order(&self) -> Vec<usize> {
        if self.options.looping && !self.options.virtualized {
            self.loop_window.order()
        } else {
            (0..self.total_slides()).collect()
        }
    }

    /// Logical indexes in the order they are rendered.
    pub fn dom_order(&self) -> Vec<usize> {
        if self.options.virtualized {
            self.virtual_window.indices()
        } else {
            self.slide_order()
        }
    }

    pub fn rendered_indices(&self) -> Vec<usize> {
        self.dom_order()
    }

    /// Logical indexes of slides intersecting the viewport.
    pub fn visible_indices(&self) -> Vec<usize> {
        let layout = self.layout();
        layout.visible(self.translate).map(|s| s.index).collect()
    }

    /// Logical indexes whose images should load eagerly, ascending.
    pub fn eager_indices(&self) -> Vec<usize> {
        let Some(p) = self.position else {
            return Vec::new();
        };
        let total = self.total_slides();
        let p = p as isize;
        let (lo, hi) = match self.options.slides_per_view {
            SlidesPerView::Auto => (p - AUTO_EAGER_RADIUS, p + AUTO_EAGER_RADIUS),
            SlidesPerView::Count(spv) if self.options.center => {
                let radius = (spv / 2.0).ceil() as isize + 1;
                (p - radius, p + radius)
            }
            SlidesPerView::Count(spv) => {
                let k = spv.ceil().max(1.0) as isize;
                (p - k, p + 2 * k - 1)
            }
        };
        let mut out = BTreeSet::new();
        for i in lo..=hi {
            if self.options.looping {
                out.insert(positive_modulo(i, total));
            } else if i >= 0 && (i as usize) < total {
                out.insert(i as usize);
            }
        }
        if self.options.virtualized {
            out.retain(|&i| self.virtual_window.contains(i));
        }
        out.into_iter().collect()
    }

    pub fn virtual_window(&self) -> VirtualWindow {
        self.virtual_window
    }

    pub fn has_reached_start(&self) -> bool {
        self.reached_start
    }

    pub fn has_reached_end(&self) -> bool {
        self.reached_end
    }

    /// The translate change of the most recent navigation, for adapters that animate it.
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Like [`Carousel::last_transition`], but hands the transition over so it is animated once.
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.last_transition.take()
    }

    pub(crate) fn record_transition(&mut self, transition: Transition) {
        self.last_transition = Some(transition);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn images_ready(&self) -> bool {
        self.images.is_ready()
    }

    /// Reports that the images of slide `index` finished loading.
    pub fn image_loaded(&mut self, index: usize) {
        if self.images.mark_loaded(index) {
            cdebug!("images ready");
            self.emit(CarouselEvent::ImagesReady);
            self.flush_events();
        }
    }

    pub fn render_state(&self) -> RenderState {
        let layout = self.layout();
        let total = self.total_slides();
        let eager: BTreeSet<usize> = self.eager_indices().into_iter().collect();
        let slides = layout
            .snaps
            .iter()
            .map(|s| RenderedSlide {
                index: s.index,
                dom_index: s.dom_index,
                start: s.start,
                size: s.size,
                translate: s.translate,
                eager: eager.contains(&s.index),
                disabled: self.options.is_disabled(s.index),
                attributes: SlideAttributes::new(s.index, total, self.position == Some(s.index)),
            })
            .collect();
        RenderState {
            active_index: self.position,
            total_slides: total,
            rendered_indices: self.dom_order(),
            slides,
            translate: self.translate,
            transform: self.transform_string(),
            reached_start: self.reached_start,
            reached_end: self.reached_end,
        }
    }

    fn navigation_input(&self, from: usize) -> NavigationInput<'_> {
        let (first_anchor, last_anchor) = self.anchors();
        NavigationInput {
            from,
            real_from: self.options.free_mode.then_some(self.real_position),
            total: self.total_slides(),
            step: self.options.step_slides,
            looping: self.options.looping,
            rewind: self.options.rewinds(),
            first_anchor,
            last_anchor,
            disabled: &self.options.disabled_slides,
        }
    }

    /// Moves `step_slides` forward. Returns `true` when the active slide changed.
    pub fn slide_next(&mut self) -> bool {
        let moved = self.step(true);
        self.flush_events();
        moved
    }

    /// Moves `step_slides` backward. Returns `true` when the active slide changed.
    pub fn slide_prev(&mut self) -> bool {
        let moved = self.step(false);
        self.flush_events();
        moved
    }

    pub(crate) fn step(&mut self, is_next: bool) -> bool {
        let Some(from) = self.position else {
            return false;
        };
        let target = {
            let input = self.navigation_input(from);
            let raw = calculate_new_position(&input, is_next);
            let in_range =
                raw >= input.first_anchor as isize && raw <= input.last_anchor as isize;
            if input.rewind && !in_range {
                resolve_rewind(&input, raw, is_next)
            } else if raw < 0 {
                return false;
            } else {
                raw as usize
            }
        };
        ctrace!(from, target, is_next, "Carousel::step");
        let travel = if is_next {
            Travel::Forward
        } else {
            Travel::Backward
        };
        let moved = self.commit_navigation(target, NavigationTrigger::Navigation, travel);
        if moved {
            self.emit(if is_next {
                CarouselEvent::SlideNext
            } else {
                CarouselEvent::SlidePrev
            });
        }
        moved
    }

    /// Jumps to a slide. Disabled targets are refused.
    pub fn slide_to(&mut self, index: usize) -> bool {
        let moved = self.go_to(index);
        self.flush_events();
        moved
    }

    /// Click on a rendered slide. Only navigates when `slide_on_click` is enabled.
    pub fn click_slide(&mut self, index: usize) -> bool {
        if !self.options.slide_on_click {
            return false;
        }
        self.slide_to(index)
    }

    fn go_to(&mut self, index: usize) -> bool {
        let Some(from) = self.position else {
            return false;
        };
        let target = {
            let input = self.navigation_input(from);
            match resolve_goto(&input, index) {
                Some(target) => target,
                None => {
                    ctrace!(index, "slide_to refused: disabled slide");
                    return false;
                }
            }
        };
        self.commit_navigation(target, NavigationTrigger::SlideTo, Travel::Nearest)
    }

    /// Commits a navigation: window preparation with translate compensation, then the new snap,
    /// then the position. Returns `true` when the active slide changed.
    pub(crate) fn commit_navigation(
        &mut self,
        target: usize,
        trigger: NavigationTrigger,
        travel: Travel,
    ) -> bool {
        let from = self.position;
        self.prepare_window(from, target, trigger, travel);

        let layout = self.layout();
        let from_translate = self.translate;
        let to_translate = layout.snap_translate(target).unwrap_or(self.translate);
        self.last_transition = Some(Transition {
            from_index: from,
            to_index: target,
            from_translate,
            to_translate,
        });
        self.translate = to_translate;
        self.real_position = target as f32;
        self.position = Some(target);

        let changed = from != Some(target);
        if changed {
            ctrace!(from = ?from, to = target, ?trigger, "slide changed");
            self.emit(CarouselEvent::SlideChanged(target));
        }
        self.update_reached(true);
        changed
    }

    fn prepare_window(
        &mut self,
        from: Option<usize>,
        target: usize,
        trigger: NavigationTrigger,
        travel: Travel,
    ) {
        if self.options.virtualized {
            let params = self.window_params();
            self.virtual_window.ensure(
                target,
                travel,
                &params,
                &self.sizes,
                self.options.space_between,
                &mut self.translate,
            );
            return;
        }
        if !self.options.looping || trigger == NavigationTrigger::Translation {
            return;
        }
        let Some(current) = from else {
            return;
        };
        if self.layout().visible(self.translate).next().is_none() {
            cwarn!(index = target, "loop insertion skipped: no slide visible");
            return;
        }
        let fill = self.loop_fill(target);
        let m = LoopMetrics {
            sizes: &self.sizes,
            gap: self.options.space_between,
            container: self.container_size,
        };
        let _inserted = match trigger {
            NavigationTrigger::Navigation => {
                let is_next = travel != Travel::Backward;
                self.loop_window
                    .by_navigation(current, target, is_next, fill, &mut self.translate, &m)
            }
            _ => self
                .loop_window
                .by_slide_to(target, fill, &mut self.translate, &m),
        };
        ctrace!(inserted = _inserted, head = self.loop_window.head(), "loop window prepared");
        debug_assert!(is_permutation(&self.loop_window.order()));
    }

    /// Runs the loop/virtual window follow-up after the translate moved continuously.
    ///
    /// Returns the translate compensation applied.
    pub(crate) fn follow_translate(&mut self) -> f32 {
        let before = self.translate;
        if self.options.virtualized {
            if let Some(nearest) = self.layout().nearest_index(self.translate) {
                let params = self.window_params();
                self.virtual_window.ensure(
                    nearest,
                    Travel::Nearest,
                    &params,
                    &self.sizes,
                    self.options.space_between,
                    &mut self.translate,
                );
            }
        } else if self.options.looping {
            let m = LoopMetrics {
                sizes: &self.sizes,
                gap: self.options.space_between,
                container: self.container_size,
            };
            self.loop_window.by_translation(&mut self.translate, &m);
            debug_assert!(is_permutation(&self.loop_window.order()));
        }
        let layout = self.layout();
        self.real_position = layout.real_position(self.translate, self.total_slides());
        self.translate - before
    }

    /// Moves the strip to `translate` without changing the active slide.
    ///
    /// Clamped into the bounds outside loop mode. Adapters use this to hand an interrupted
    /// animation back to the engine.
    pub fn set_translate(&mut self, translate: f32) {
        if self.position.is_none() || !translate.is_finite() {
            return;
        }
        self.translate = self.layout().clamp_translate(translate);
        self.follow_translate();
    }

    pub(crate) fn set_raw_translate(&mut self, translate: f32) {
        self.translate = translate;
    }

    /// Whether the strip rests on one of its bounds (never in loop mode).
    pub fn is_at_edge(&self) -> bool {
        self.layout().is_at_edge(self.translate)
    }

    pub(crate) fn update_reached(&mut self, emit: bool) {
        let (start, end) = match self.position {
            Some(p) if !self.options.looping => {
                if self.options.free_mode {
                    let layout = self.layout();
                    (
                        self.translate >= layout.min_translate - EPSILON,
                        self.translate <= layout.effective_max_translate() + EPSILON,
                    )
                } else {
                    let (first, last) = self.anchors();
                    (p <= first, p >= last.max(first))
                }
            }
            _ => (false, false),
        };
        if emit && start && !self.reached_start {
            self.emit(CarouselEvent::ReachedStart);
        }
        if emit && end && !self.reached_end {
            self.emit(CarouselEvent::ReachedEnd);
        }
        self.reached_start = start;
        self.reached_end = end;
    }

    pub(crate) fn set_position_from_translate(&mut self) {
        let layout = self.layout();
        let Some(nearest) = layout.nearest_index(self.translate) else {
            return;
        };
        if self.options.virtualized && !self.virtual_window.contains(nearest) {
            // Anchor clamping can pick a slide outside the window.
            let params = self.window_params();
            self.virtual_window.ensure(
                nearest,
                Travel::Nearest,
                &params,
                &self.sizes,
                self.options.space_between,
                &mut self.translate,
            );
        }
        let layout = self.layout();
        self.real_position = layout.real_position(self.translate, self.total_slides());
        if self.position != Some(nearest) {
            self.position = Some(nearest);
            self.emit(CarouselEvent::SlideChanged(nearest));
        }
        self.update_reached(true);
    }

    pub(crate) fn finish(&mut self) {
        self.flush_events();
    }
}

fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &i in order {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}
