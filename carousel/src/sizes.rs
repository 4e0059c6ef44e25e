use crate::fenwick::Fenwick;

/// Per-slide main-axis sizes, indexed by logical slide index.
///
/// Sizes are sparse until measured. Unmeasured slides resolve to a fallback: the fixed size derived
/// from a numeric `slides_per_view`, else the average of the measured sizes, else the container
/// size. Two Fenwick trees (measured sizes, measured counts) keep range sums `O(log n)` with the
/// fallback applied on the fly.
#[derive(Clone, Debug, Default)]
pub(crate) struct SlideSizes {
    sizes: Vec<f32>,
    measured: Vec<bool>,
    measured_sums: Fenwick,
    measured_counts: Fenwick,
    fixed: Option<f32>,
    container: f32,
}

impl SlideSizes {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            sizes: vec![0.0; count],
            measured: vec![false; count],
            measured_sums: Fenwick::new(count),
            measured_counts: Fenwick::new(count),
            fixed: None,
            container: 0.0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Grows or shrinks the store, keeping measurements of surviving indexes.
    pub(crate) fn resize(&mut self, count: usize) {
        if count == self.sizes.len() {
            return;
        }
        self.sizes.resize(count, 0.0);
        self.measured.resize(count, false);
        self.rebuild();
    }

    /// Sets the size every slide takes when `slides_per_view` is numeric.
    pub(crate) fn set_fixed(&mut self, fixed: Option<f32>) {
        self.fixed = fixed.map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 });
    }

    pub(crate) fn set_container(&mut self, container: f32) {
        self.container = container.max(0.0);
    }

    /// Records a measured size. Returns `true` when the stored size changed.
    pub(crate) fn measure(&mut self, index: usize, size: f32) -> bool {
        if index >= self.sizes.len() {
            cwarn!(index, count = self.sizes.len(), "measure: out-of-range slide index");
            return false;
        }
        let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        let was_measured = self.measured[index];
        let cur = self.sizes[index];
        if was_measured && cur == size {
            return false;
        }
        let prev = if was_measured { cur as f64 } else { 0.0 };
        self.sizes[index] = size;
        self.measured[index] = true;
        self.measured_sums.add(index, size as f64 - prev);
        if !was_measured {
            self.measured_counts.add(index, 1.0);
        }
        true
    }

    pub(crate) fn clear_measurements(&mut self) {
        self.sizes.iter_mut().for_each(|s| *s = 0.0);
        self.measured.iter_mut().for_each(|m| *m = false);
        self.rebuild();
    }

    pub(crate) fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn measured_count(&self) -> usize {
        self.measured_counts.total() as usize
    }

    /// Size used for any slide whose size is not known.
    pub(crate) fn fallback(&self) -> f32 {
        if let Some(fixed) = self.fixed {
            return fixed;
        }
        let n = self.measured_counts.total();
        if n > 0.0 {
            return (self.measured_sums.total() / n) as f32;
        }
        self.container
    }

    pub(crate) fn size(&self, index: usize) -> f32 {
        if let Some(fixed) = self.fixed {
            return fixed;
        }
        if self.is_measured(index) {
            self.sizes[index]
        } else {
            self.fallback()
        }
    }

    /// Sum of sizes over `[start, end)`, excluding gaps.
    pub(crate) fn range_size(&self, start: usize, end: usize) -> f64 {
        let end = end.min(self.sizes.len());
        if end <= start {
            return 0.0;
        }
        let count = (end - start) as f64;
        if let Some(fixed) = self.fixed {
            return fixed as f64 * count;
        }
        let measured = self.measured_counts.range_sum(start, end);
        let sum = self.measured_sums.range_sum(start, end);
        sum + (count - measured) * self.fallback() as f64
    }

    /// Distance from the start of slide 0 to the start of slide `index`, in logical order.
    pub(crate) fn offset_of(&self, index: usize, gap: f32) -> f32 {
        (self.range_size(0, index) + index as f64 * gap as f64) as f32
    }

    /// Total size of all slides in logical order, including the gaps between them.
    pub(crate) fn content_size(&self, gap: f32) -> f32 {
        let n = self.sizes.len();
        if n == 0 {
            return 0.0;
        }
        (self.range_size(0, n) + (n - 1) as f64 * gap as f64) as f32
    }

    fn rebuild(&mut self) {
        let n = self.sizes.len();
        self.measured_sums = Fenwick::from_values(
            self.sizes
                .iter()
                .zip(&self.measured)
                .map(|(&s, &m)| if m { s as f64 } else { 0.0 }),
        );
        self.measured_counts =
            Fenwick::from_values(self.measured.iter().map(|&m| if m { 1.0 } else { 0.0 }));
        debug_assert_eq!(self.measured_sums.len(), n);
    }
}
