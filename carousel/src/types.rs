/// The main axis the slide strip scrolls along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Writing direction. Only affects the horizontal axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// How many slides fit into the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlidesPerView {
    /// A fixed (possibly fractional) number of slides; slide sizes are derived from it.
    Count(f32),
    /// Slides keep their own measured size.
    Auto,
}

impl Default for SlidesPerView {
    fn default() -> Self {
        Self::Count(1.0)
    }
}

impl SlidesPerView {
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    pub fn count(self) -> Option<f32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Auto => None,
        }
    }
}

/// What triggered a navigation. Selects the loop insertion strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationTrigger {
    /// Continuous drag or inertia.
    Translation,
    /// Prev/next buttons, keyboard, wheel, autoplay.
    Navigation,
    /// Click on a slide or a programmatic jump.
    SlideTo,
}

/// Travel direction hint for window managers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Travel {
    Forward,
    Backward,
    /// Pick whichever direction is shorter.
    Nearest,
}

/// An element rectangle as reported by the measurement collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scrollable extent of an element (`scrollWidth`/`scrollHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollExtent {
    pub width: f32,
    pub height: f32,
}

/// A pointer position in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerPosition {
    pub page_x: f32,
    pub page_y: f32,
}

impl PointerPosition {
    pub fn new(page_x: f32, page_y: f32) -> Self {
        Self { page_x, page_y }
    }
}

/// An inclusive range of logical indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl IndexRange {
    pub fn count(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// `a mod n` that is always in `[0, n)`.
pub fn positive_modulo(a: isize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    a.rem_euclid(n as isize) as usize
}
