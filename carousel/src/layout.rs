use crate::options::CarouselOptions;
use crate::sizes::SlideSizes;
use crate::SlidesPerView;

/// Tolerance for comparing translate values, in pixels.
pub(crate) const EPSILON: f32 = 0.5;

/// A rendered slide and the translate at which it becomes the active slide.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideSnap {
    pub dom_index: usize,
    /// Logical slide index.
    pub index: usize,
    /// Offset of the slide from the start of the strip.
    pub start: f32,
    pub size: f32,
    /// Snap position of the slide.
    pub translate: f32,
}

impl SlideSnap {
    pub fn end(&self) -> f32 {
        self.start + self.size
    }

    /// Whether the slide intersects `[0, container_size]` when the strip sits at `translate`.
    pub fn is_visible(&self, translate: f32, container_size: f32) -> bool {
        let start = self.start + translate;
        let end = start + self.size;
        start < container_size && end > 0.0
    }
}

/// Geometry derived from one snapshot of the carousel state.
///
/// Every field is a pure function of options, container size, slide sizes and DOM order; a
/// `Layout` is recomputed on read and never goes stale within one engine call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub container_size: f32,
    /// Size of the rendered strip including gaps.
    pub content_size: f32,
    pub gap: f32,
    /// Peek size in pixels, applied at both edges.
    pub peek: f32,
    pub min_translate: f32,
    /// Raw lower bound. May exceed `min_translate` when the content is smaller than the viewport;
    /// use [`Layout::effective_max_translate`] for clamping.
    pub max_translate: f32,
    pub first_anchor: usize,
    pub last_anchor: usize,
    /// Snaps in DOM order.
    pub snaps: Vec<SlideSnap>,
    pub looping: bool,
}

pub(crate) struct LayoutInput<'a> {
    pub(crate) options: &'a CarouselOptions,
    pub(crate) container: f32,
    pub(crate) sizes: &'a SlideSizes,
    pub(crate) dom_order: &'a [usize],
    /// Logical offset of the first rendered slide (non-zero only for a bounded virtual window).
    pub(crate) origin: f32,
}

impl Layout {
    pub(crate) fn compute(input: LayoutInput<'_>) -> Self {
        let o = input.options;
        let c = input.container;
        let gap = o.space_between;
        let peek = peek_px(o, c);

        let mut snaps = Vec::with_capacity(input.dom_order.len());
        let mut start = 0.0f32;
        for (dom_index, &index) in input.dom_order.iter().enumerate() {
            let size = input.sizes.size(index);
            snaps.push(SlideSnap {
                dom_index,
                index,
                start,
                size,
                translate: 0.0,
            });
            start += size + gap;
        }
        let content_size = if snaps.is_empty() { 0.0 } else { start - gap };

        // Bounds are derived from the whole logical sequence and shifted into the coordinates of
        // the rendered strip, so a virtual window clamps exactly like the full list would.
        let n = input.sizes.len();
        let full_content = input.sizes.content_size(gap);
        let min_plain = o.margin_start + peek;
        let max_plain = c - full_content - o.margin_end - peek;
        let (min_full, max_full) = if o.center && !o.not_center_bounds && n > 0 {
            (
                min_plain + (c / 2.0 - input.sizes.size(0) / 2.0),
                max_plain - (c / 2.0 - input.sizes.size(n - 1) / 2.0),
            )
        } else {
            (min_plain, max_plain)
        };
        let min_translate = min_full + input.origin;
        let max_translate = max_full + input.origin;
        let effective_max = max_translate.min(min_translate);

        for snap in &mut snaps {
            let raw = if o.center {
                min_plain + c / 2.0 - snap.size / 2.0 - snap.start
            } else {
                min_plain - snap.start
            };
            snap.translate = if o.looping {
                raw
            } else {
                raw.clamp(effective_max, min_translate)
            };
        }

        let (first_anchor, last_anchor) = anchors(o, c, input.sizes);

        Self {
            container_size: c,
            content_size,
            gap,
            peek,
            min_translate,
            max_translate,
            first_anchor,
            last_anchor,
            snaps,
            looping: o.looping,
        }
    }

    /// Lower clamp bound; equals `min_translate` when the content fits the viewport.
    pub fn effective_max_translate(&self) -> f32 {
        self.max_translate.min(self.min_translate)
    }

    /// Clamps a translate into the bounds. Loop mode has no bounds.
    pub fn clamp_translate(&self, translate: f32) -> f32 {
        if self.looping {
            return translate;
        }
        translate.clamp(self.effective_max_translate(), self.min_translate)
    }

    /// Whether `translate` rests on (or beyond) one of the bounds.
    pub fn is_at_edge(&self, translate: f32) -> bool {
        !self.looping
            && (translate >= self.min_translate - EPSILON
                || translate <= self.effective_max_translate() + EPSILON)
    }

    pub fn snap(&self, index: usize) -> Option<&SlideSnap> {
        self.snaps.iter().find(|s| s.index == index)
    }

    pub fn snap_translate(&self, index: usize) -> Option<f32> {
        self.snap(index).map(|s| s.translate)
    }

    /// Snaps whose slide intersects the viewport at `translate`.
    pub fn visible(&self, translate: f32) -> impl Iterator<Item = &SlideSnap> + '_ {
        let c = self.container_size;
        self.snaps
            .iter()
            .filter(move |s| s.is_visible(translate, c))
    }

    /// Logical index of the snap closest to `translate`, kept within the anchors outside loop mode.
    pub fn nearest_index(&self, translate: f32) -> Option<usize> {
        let mut best: Option<&SlideSnap> = None;
        for snap in &self.snaps {
            let better = match best {
                None => true,
                Some(b) => (snap.translate - translate).abs() < (b.translate - translate).abs(),
            };
            if better {
                best = Some(snap);
            }
        }
        let index = best?.index;
        if self.looping {
            Some(index)
        } else {
            Some(index.clamp(self.first_anchor, self.last_anchor.max(self.first_anchor)))
        }
    }

    /// Fractional logical position for a translate, interpolated between neighbouring snaps.
    pub fn real_position(&self, translate: f32, total: usize) -> f32 {
        if self.snaps.is_empty() || total == 0 {
            return 0.0;
        }
        for pair in self.snaps.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let span = a.translate - b.translate;
            if span <= f32::EPSILON {
                continue;
            }
            if translate <= a.translate && translate >= b.translate {
                let frac = (a.translate - translate) / span;
                let real = a.index as f32 + frac;
                return if self.looping {
                    real % total as f32
                } else {
                    real.min((total - 1) as f32)
                };
            }
        }
        self.nearest_index(translate).map_or(0.0, |i| i as f32)
    }
}

/// Peek size in pixels for the current container.
pub(crate) fn peek_px(options: &CarouselOptions, container: f32) -> f32 {
    options.peek_edges.map_or(0.0, |p| p.resolve(container))
}

/// Slide size implied by a numeric `slides_per_view`; `None` for `Auto`.
pub(crate) fn fixed_slide_size(options: &CarouselOptions, container: f32) -> Option<f32> {
    let spv = options.slides_per_view.count()?;
    let peek = peek_px(options, container);
    let gaps = (spv - 1.0).max(0.0) * options.space_between;
    let available = container - options.margin_start - options.margin_end - 2.0 * peek - gaps;
    Some((available / spv).max(0.0))
}

/// `slides_per_view` as a number, estimating it from slide sizes in `Auto` mode.
pub(crate) fn effective_slides_per_view(
    options: &CarouselOptions,
    container: f32,
    sizes: &SlideSizes,
) -> f32 {
    match options.slides_per_view {
        SlidesPerView::Count(n) => n,
        SlidesPerView::Auto => {
            let slide = sizes.fallback() + options.space_between;
            if slide > 0.0 && container > 0.0 {
                (container / slide).max(1.0)
            } else {
                1.0
            }
        }
    }
}

/// First and last legal resting positions, over the full logical sequence.
///
/// Computed from logical sizes rather than the rendered strip so that virtual mode (where only a
/// window is rendered) agrees with plain mode.
pub(crate) fn anchors(options: &CarouselOptions, container: f32, sizes: &SlideSizes) -> (usize, usize) {
    let n = sizes.len();
    if n == 0 {
        return (0, 0);
    }
    // Without a container nothing is measured yet; every slide stays reachable until it is.
    if options.looping || (options.center && !options.not_center_bounds) || container <= 0.0 {
        return (0, n - 1);
    }

    let gap = options.space_between;
    let peek = peek_px(options, container);
    let content = sizes.content_size(gap);
    // Everything fits: the only resting position is the first slide.
    if content + options.margin_start + options.margin_end + 2.0 * peek <= container + EPSILON {
        return (0, 0);
    }
    let min_plain = options.margin_start + peek;
    let max_plain = (container - content - options.margin_end - peek).min(min_plain);

    let raw = |i: usize| {
        let offset = sizes.offset_of(i, gap);
        if options.center {
            min_plain + container / 2.0 - sizes.size(i) / 2.0 - offset
        } else {
            min_plain - offset
        }
    };

    // Walk in from the end: every slide whose snap reaches the end bound rests at the same place.
    let mut last = n - 1;
    for i in (0..n).rev() {
        if raw(i) <= max_plain + EPSILON {
            last = i;
        } else {
            break;
        }
    }

    let mut first = 0;
    if options.center {
        for i in 0..n {
            if raw(i) >= min_plain - EPSILON {
                first = i;
            } else {
                break;
            }
        }
    }

    if first > last { (0, 0) } else { (first, last) }
}
