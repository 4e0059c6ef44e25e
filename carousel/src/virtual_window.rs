use crate::loop_window::wrapped_range_size;
use crate::sizes::SlideSizes;
use crate::types::positive_modulo;
use crate::{IndexRange, Travel};

/// Sizing inputs for the virtual window, derived from options and measurements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WindowParams {
    pub(crate) total: usize,
    /// Effective slides per view (numeric, or estimated in `Auto` mode).
    pub(crate) slides_per_view: f32,
    pub(crate) buffer: f32,
    pub(crate) center: bool,
    pub(crate) looping: bool,
}

impl WindowParams {
    fn visible(&self) -> usize {
        (self.slides_per_view.max(1.0).ceil() as usize).max(1)
    }

    /// Buffered slides wanted on each side.
    fn side(&self) -> usize {
        (self.slides_per_view.max(1.0) * self.buffer).ceil() as usize
    }

    /// Slides needed before and after the active one to cover the viewport.
    fn lead_trail(&self) -> (usize, usize) {
        let visible = self.visible();
        if self.center {
            (visible / 2, visible / 2)
        } else {
            (0, visible - 1)
        }
    }

    fn loop_size(&self) -> usize {
        let wanted = (self.slides_per_view.max(1.0) * (1.0 + 2.0 * self.buffer)).ceil() as usize;
        wanted.max(self.visible()).min(self.total)
    }
}

/// The range of logical indexes currently materialized in virtual mode.
///
/// Bounded mode renders `start..=end`. Looping mode renders `size` slides starting at
/// `loop_start`, wrapping modulo the slide count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize, // inclusive
    pub loop_start: usize,
    pub size: usize,
    pub looping: bool,
    total: usize,
}

impl VirtualWindow {
    /// Window around `position` with no translate bookkeeping (initial render, relayout).
    pub(crate) fn around(position: usize, p: &WindowParams) -> Self {
        if p.total == 0 {
            return Self::default();
        }
        let position = position.min(p.total - 1);
        if p.looping {
            let size = p.loop_size();
            let (lower, _) = loop_slot_bounds(p, size);
            let loop_start = positive_modulo(position as isize - lower as isize, p.total);
            return Self {
                start: 0,
                end: 0,
                loop_start,
                size,
                looping: true,
                total: p.total,
            };
        }
        let range = bounded_required(position, p);
        Self {
            start: range.start,
            end: range.end,
            loop_start: 0,
            size: range.count(),
            looping: false,
            total: p.total,
        }
    }

    pub fn len(&self) -> usize {
        if self.total == 0 { 0 } else { self.size }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendered logical indexes in DOM order.
    pub fn indices(&self) -> Vec<usize> {
        if self.total == 0 {
            return Vec::new();
        }
        if self.looping {
            (0..self.size)
                .map(|i| positive_modulo((self.loop_start + i) as isize, self.total))
                .collect()
        } else {
            (self.start..=self.end).collect()
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        if self.total == 0 || index >= self.total {
            return false;
        }
        if self.looping {
            positive_modulo(index as isize - self.loop_start as isize, self.total) < self.size
        } else {
            IndexRange {
                start: self.start,
                end: self.end,
            }
            .contains(index)
        }
    }

    /// Shifts the window so `target` has its buffer on both sides, compensating `translate` so
    /// the rendered slides stay visually still. Returns `true` when the window moved.
    pub(crate) fn ensure(
        &mut self,
        target: usize,
        travel: Travel,
        p: &WindowParams,
        sizes: &SlideSizes,
        gap: f32,
        translate: &mut f32,
    ) -> bool {
        if p.total == 0 || target >= p.total {
            return false;
        }
        if p.total != self.total || p.looping != self.looping {
            *self = Self::around(target, p);
            return true;
        }
        if self.looping {
            self.ensure_loop(target, travel, p, sizes, gap, translate)
        } else {
            self.ensure_bounded(target, p, sizes, gap, translate)
        }
    }

    fn ensure_bounded(
        &mut self,
        target: usize,
        p: &WindowParams,
        sizes: &SlideSizes,
        gap: f32,
        translate: &mut f32,
    ) -> bool {
        let required = bounded_required(target, p);
        if required.start >= self.start && required.end <= self.end {
            return false;
        }
        let old_start = self.start;
        let new_start = required.start;
        if new_start > old_start {
            let n = new_start - old_start;
            *translate += (sizes.range_size(old_start, new_start) + n as f64 * gap as f64) as f32;
        } else if new_start < old_start {
            let n = old_start - new_start;
            *translate -= (sizes.range_size(new_start, old_start) + n as f64 * gap as f64) as f32;
        }
        cdebug!(
            from_start = old_start,
            from_end = self.end,
            to_start = required.start,
            to_end = required.end,
            "virtual window recentred"
        );
        self.start = required.start;
        self.end = required.end;
        self.size = required.count();
        true
    }

    fn ensure_loop(
        &mut self,
        target: usize,
        travel: Travel,
        p: &WindowParams,
        sizes: &SlideSizes,
        gap: f32,
        translate: &mut f32,
    ) -> bool {
        let n = p.total;
        let size = self.size;
        let (lower, upper) = loop_slot_bounds(p, size);

        let d = positive_modulo(target as isize - self.loop_start as isize, n) as isize;
        let d = if d < size as isize {
            d
        } else {
            match travel {
                Travel::Forward => d,
                Travel::Backward => d - n as isize,
                Travel::Nearest => {
                    let past_end = d - (size as isize - 1);
                    let before_start = n as isize - d;
                    if past_end <= before_start { d } else { d - n as isize }
                }
            }
        };

        let shift = if d < lower as isize {
            d - lower as isize
        } else if d > upper as isize {
            d - upper as isize
        } else {
            0
        };
        if shift == 0 {
            return false;
        }

        let steps = shift.unsigned_abs();
        if shift > 0 {
            let leaving = wrapped_range_size(sizes, self.loop_start, steps, n);
            *translate += (leaving + steps as f64 * gap as f64) as f32;
            self.loop_start = positive_modulo(self.loop_start as isize + shift, n);
        } else {
            let new_start = positive_modulo(self.loop_start as isize + shift, n);
            let entering = wrapped_range_size(sizes, new_start, steps, n);
            *translate -= (entering + steps as f64 * gap as f64) as f32;
            self.loop_start = new_start;
        }
        cdebug!(shift, loop_start = self.loop_start, "virtual loop window rotated");
        true
    }
}

/// Buffered range for `position` in bounded virtual mode, clamped to `[0, total)`.
fn bounded_required(position: usize, p: &WindowParams) -> IndexRange {
    let side = p.side();
    let (lead, trail) = p.lead_trail();
    let last = p.total.saturating_sub(1);
    IndexRange {
        start: position.saturating_sub(lead + side),
        end: (position + trail + side).min(last),
    }
}

/// DOM slots the active slide may occupy in the looping window.
///
/// Prefers room for the viewport plus the buffer on both sides. When the window is too small for
/// that, only the buffer is kept, which still rotates by the fewest steps.
fn loop_slot_bounds(p: &WindowParams, size: usize) -> (usize, usize) {
    let last_slot = size.saturating_sub(1);
    let side = p.side().min(last_slot / 2);
    let (lead, trail) = p.lead_trail();
    let lower = side + lead;
    let upper = last_slot.saturating_sub(side + trail);
    if lower > upper {
        (side, last_slot - side)
    } else {
        (lower, upper)
    }
}
