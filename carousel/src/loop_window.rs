use crate::sizes::SlideSizes;
use crate::types::positive_modulo;

/// How close (in pixels) the strip edge may get to the viewport edge before a slide is moved
/// around during a drag.
pub const LOOP_EDGE_BUFFER: f32 = 50.0;

/// Result of moving one slide to the opposite edge of the strip.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertOutcome {
    Inserted {
        /// Logical index of the moved slide.
        index: usize,
        /// Translate delta applied to keep the strip visually still.
        compensation: f32,
    },
    /// Nothing was moved; callers must stop repeating the strategy.
    NoOp,
}

impl InsertOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Geometry the loop strategies need besides the slot permutation itself.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LoopMetrics<'a> {
    pub(crate) sizes: &'a SlideSizes,
    pub(crate) gap: f32,
    pub(crate) container: f32,
}

/// Slot permutation for infinite loop mode.
///
/// Slides are a fixed pool of slots; the strip is a ring whose first slot holds logical index
/// `head`. Moving a slide from one edge to the other only rotates the ring, so the order is always
/// a rotation of `0..len` and can never duplicate or drop an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopWindow {
    head: usize,
    len: usize,
}

impl LoopWindow {
    pub fn new(len: usize) -> Self {
        Self { head: 0, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical index held by the first slot.
    pub fn head(&self) -> usize {
        self.head
    }

    /// `order()[dom_index] == logical index`.
    pub fn order(&self) -> Vec<usize> {
        (0..self.len).map(|d| self.index_at(d)).collect()
    }

    pub fn index_at(&self, dom_index: usize) -> usize {
        if self.len == 0 {
            return 0;
        }
        (self.head + dom_index) % self.len
    }

    pub fn slot_of(&self, index: usize) -> Option<usize> {
        (index < self.len).then(|| positive_modulo(index as isize - self.head as isize, self.len))
    }

    /// Distance from the strip start to the start of `slot`.
    fn slot_offset(&self, slot: usize, m: &LoopMetrics<'_>) -> f32 {
        let sizes = wrapped_range_size(m.sizes, self.head, slot, self.len);
        (sizes + slot as f64 * m.gap as f64) as f32
    }

    fn content_size(&self, m: &LoopMetrics<'_>) -> f32 {
        m.sizes.content_size(m.gap)
    }

    fn is_slot_visible(&self, slot: usize, translate: f32, m: &LoopMetrics<'_>) -> bool {
        let start = self.slot_offset(slot, m) + translate;
        let end = start + m.sizes.size(self.index_at(slot));
        start < m.container && end > 0.0
    }

    /// Moves the slide at the opposite edge to the requested edge and compensates `translate` in
    /// the same step, so the permutation and the translate can never disagree.
    ///
    /// `protected` slides are never moved.
    pub(crate) fn insert(
        &mut self,
        before: bool,
        translate: &mut f32,
        protected: &[usize],
        m: &LoopMetrics<'_>,
    ) -> InsertOutcome {
        if self.len < 2 {
            return InsertOutcome::NoOp;
        }
        let moving = if before {
            self.index_at(self.len - 1)
        } else {
            self.head
        };
        if protected.contains(&moving) {
            ctrace!(index = moving, before, "loop insert blocked by protected slide");
            return InsertOutcome::NoOp;
        }
        let span = m.sizes.size(moving) + m.gap;
        let compensation = if before {
            self.head = moving;
            -span
        } else {
            self.head = (self.head + 1) % self.len;
            span
        };
        *translate += compensation;
        ctrace!(index = moving, before, compensation, "loop insert");
        InsertOutcome::Inserted {
            index: moving,
            compensation,
        }
    }

    /// Drag strategy: keeps at least [`LOOP_EDGE_BUFFER`] of strip beyond both viewport edges.
    ///
    /// A slide that is itself visible is never moved; the call then stops with a no-op.
    pub(crate) fn by_translation(&mut self, translate: &mut f32, m: &LoopMetrics<'_>) -> f32 {
        let mut total = 0.0;
        for _ in 0..self.len {
            if *translate <= -LOOP_EDGE_BUFFER {
                break;
            }
            let last_slot = self.len.saturating_sub(1);
            if self.is_slot_visible(last_slot, *translate, m) {
                break;
            }
            match self.insert(true, translate, &[], m) {
                InsertOutcome::Inserted { compensation, .. } => total += compensation,
                InsertOutcome::NoOp => break,
            }
        }
        for _ in 0..self.len {
            let strip_end = *translate + self.content_size(m);
            if strip_end >= m.container + LOOP_EDGE_BUFFER {
                break;
            }
            if self.is_slot_visible(0, *translate, m) {
                break;
            }
            match self.insert(false, translate, &[], m) {
                InsertOutcome::Inserted { compensation, .. } => total += compensation,
                InsertOutcome::NoOp => break,
            }
        }
        total
    }

    /// Button strategy: makes sure `target` sits on the side of `current` the carousel moves
    /// toward, then that the viewport around the target can be filled.
    pub(crate) fn by_navigation(
        &mut self,
        current: usize,
        target: usize,
        is_next: bool,
        fill: (f32, f32),
        translate: &mut f32,
        m: &LoopMetrics<'_>,
    ) -> usize {
        let mut inserted = 0;
        for _ in 0..self.len {
            let (Some(cur), Some(tgt)) = (self.slot_of(current), self.slot_of(target)) else {
                break;
            };
            let misplaced = if is_next { tgt <= cur } else { tgt >= cur };
            if !misplaced || current == target {
                break;
            }
            if self
                .insert(!is_next, translate, &[current], m)
                .is_noop()
            {
                break;
            }
            inserted += 1;
        }
        let (lead, trail) = fill;
        inserted + self.ensure_span(target, lead, trail, translate, m)
    }

    /// Jump strategy: fills `lead` pixels before and `trail` pixels from the start of `target`.
    pub(crate) fn by_slide_to(
        &mut self,
        target: usize,
        fill: (f32, f32),
        translate: &mut f32,
        m: &LoopMetrics<'_>,
    ) -> usize {
        self.ensure_span(target, fill.0, fill.1, translate, m)
    }

    fn ensure_span(
        &mut self,
        target: usize,
        lead: f32,
        trail: f32,
        translate: &mut f32,
        m: &LoopMetrics<'_>,
    ) -> usize {
        let mut inserted = 0;
        let content = self.content_size(m);
        for _ in 0..self.len {
            let Some(slot) = self.slot_of(target) else {
                break;
            };
            let before = self.slot_offset(slot, m);
            let after = content - before;
            let needs_before = before + crate::layout::EPSILON < lead;
            let needs_after = after + crate::layout::EPSILON < trail;
            let outcome = match (needs_before, needs_after) {
                (false, false) => break,
                (true, _) => self.insert(true, translate, &[target], m),
                (false, true) => self.insert(false, translate, &[target], m),
            };
            if outcome.is_noop() {
                break;
            }
            // Both sides short: the ring is too small to satisfy either fully.
            if needs_before && needs_after {
                inserted += 1;
                break;
            }
            inserted += 1;
        }
        inserted
    }
}

/// Sum of sizes of `count` consecutive logical slides starting at `start`, wrapping at `len`.
pub(crate) fn wrapped_range_size(sizes: &SlideSizes, start: usize, count: usize, len: usize) -> f64 {
    if len == 0 || count == 0 {
        return 0.0;
    }
    let full_turns = count / len;
    let rest = count % len;
    let mut sum = full_turns as f64 * sizes.range_size(0, len);
    let end = start + rest;
    if end <= len {
        sum += sizes.range_size(start, end);
    } else {
        sum += sizes.range_size(start, len) + sizes.range_size(0, end - len);
    }
    sum
}
