use core::cmp;

/// Prefix sums over per-slide values, `O(log n)` point update and query.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<f64>, // 1-indexed
    total: f64,
}

impl Fenwick {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            tree: vec![0.0; n + 1],
            total: 0.0,
        }
    }

    pub(crate) fn from_values(values: impl ExactSizeIterator<Item = f64>) -> Self {
        let n = values.len();
        let mut tree = vec![0.0f64; n + 1];
        let mut total = 0.0f64;
        for (k, v) in values.enumerate() {
            let i = k + 1;
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self { tree, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn add(&mut self, index: usize, delta: f64) {
        let n = self.len();
        if index >= n || delta == 0.0 {
            return;
        }
        self.total += delta;
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values.
    pub(crate) fn prefix_sum(&self, count: usize) -> f64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0.0f64;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    /// Sum of values in `[start, end)`.
    pub(crate) fn range_sum(&self, start: usize, end: usize) -> f64 {
        if end <= start {
            return 0.0;
        }
        self.prefix_sum(end) - self.prefix_sum(start)
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}
