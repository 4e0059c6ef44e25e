//! Stateless next/prev/goto position math.

use std::collections::BTreeSet;

use crate::types::positive_modulo;

/// Everything the calculator reads from the carousel, captured as plain data.
#[derive(Clone, Copy, Debug)]
pub struct NavigationInput<'a> {
    pub from: usize,
    /// Fractional position to step from (free mode); `from` is used when `None`.
    pub real_from: Option<f32>,
    pub total: usize,
    pub step: usize,
    pub looping: bool,
    pub rewind: bool,
    pub first_anchor: usize,
    pub last_anchor: usize,
    pub disabled: &'a BTreeSet<usize>,
}

impl NavigationInput<'_> {
    fn base(&self) -> isize {
        match self.real_from {
            Some(real) if real.is_finite() => real.round() as isize,
            _ => self.from as isize,
        }
    }

    fn is_disabled(&self, index: usize) -> bool {
        self.disabled.contains(&index)
    }
}

/// Computes the position one step forward (`is_next`) or backward.
///
/// - Loop: wraps modulo `total`.
/// - Rewind: returned unclamped; callers detect the overshoot with [`resolve_rewind`].
/// - Otherwise: clamped to `[first_anchor, last_anchor]`.
///
/// Disabled targets are skipped in the direction of travel. When no enabled slide is found the
/// result is `from`.
pub fn calculate_new_position(input: &NavigationInput<'_>, is_next: bool) -> isize {
    if input.total == 0 {
        return -1;
    }
    let step = input.step.max(1) as isize;
    let raw = if is_next {
        input.base() + step
    } else {
        input.base() - step
    };

    if input.looping {
        let target = positive_modulo(raw, input.total);
        return skip_disabled(input, target, is_next) as isize;
    }

    if input.rewind {
        if raw < input.first_anchor as isize || raw > input.last_anchor as isize {
            return raw;
        }
        return skip_disabled(input, raw as usize, is_next) as isize;
    }

    let first = input.first_anchor;
    let last = input.last_anchor.max(first);
    let target = raw.clamp(first as isize, last as isize) as usize;
    skip_disabled(input, target, is_next) as isize
}

/// Substitutes the rewind target for an out-of-range position.
///
/// A step that overshoots an edge first lands on that edge; only a step taken while already
/// resting on the edge wraps around. This way rewind never skips the slides between the current
/// position and the edge.
pub fn resolve_rewind(input: &NavigationInput<'_>, raw: isize, is_next: bool) -> usize {
    let first = input.first_anchor;
    let last = input.last_anchor.max(first);
    let target = if raw > last as isize {
        if input.from >= last { first } else { last }
    } else if raw < first as isize {
        if input.from <= first { last } else { first }
    } else {
        raw as usize
    };
    skip_disabled(input, target, is_next)
}

/// Returns `target` if enabled, else the next enabled index in the direction of travel.
///
/// Loop mode wraps modulo `total`; bounded modes stop at the anchors. Falls back to `from`.
pub fn skip_disabled(input: &NavigationInput<'_>, target: usize, is_next: bool) -> usize {
    if !input.is_disabled(target) {
        return target;
    }
    if input.looping {
        for k in 1..input.total {
            let offset = if is_next { k as isize } else { -(k as isize) };
            let candidate = positive_modulo(target as isize + offset, input.total);
            if candidate == input.from {
                break;
            }
            if !input.is_disabled(candidate) {
                return candidate;
            }
        }
        return input.from;
    }

    let last = input.last_anchor.max(input.first_anchor);
    let mut candidate = target;
    loop {
        candidate = if is_next {
            if candidate >= last {
                return input.from;
            }
            candidate + 1
        } else {
            if candidate <= input.first_anchor {
                return input.from;
            }
            candidate - 1
        };
        if !input.is_disabled(candidate) {
            return candidate;
        }
    }
}

/// Clamps a direct jump target into the legal range, or wraps it in loop mode.
///
/// Returns `None` when the target is disabled: clicking a disabled slide does nothing.
pub fn resolve_goto(input: &NavigationInput<'_>, index: usize) -> Option<usize> {
    if input.total == 0 {
        return None;
    }
    let target = if input.looping {
        index % input.total
    } else {
        index.clamp(input.first_anchor, input.last_anchor.max(input.first_anchor))
    };
    if input.is_disabled(target) || input.is_disabled(index.min(input.total - 1)) {
        return None;
    }
    Some(target)
}
