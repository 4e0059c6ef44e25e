use crate::{Axis, Bounds, Direction, PointerPosition, ScrollExtent};

/// Axis-agnostic geometry.
///
/// Everything downstream reads sizes and pointer positions through this type, so the rest of the
/// engine never branches on horizontal vs vertical (or LTR vs RTL).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisGeometry {
    pub axis: Axis,
    pub direction: Direction,
}

impl AxisGeometry {
    pub fn new(axis: Axis, direction: Direction) -> Self {
        Self { axis, direction }
    }

    pub fn is_horizontal(&self) -> bool {
        self.axis == Axis::Horizontal
    }

    /// `-1` when the main axis runs right-to-left, `1` otherwise.
    pub fn sign(&self) -> f32 {
        if self.is_horizontal() && self.direction == Direction::Rtl {
            -1.0
        } else {
            1.0
        }
    }

    pub fn container_size(&self, rect: Option<&Bounds>) -> f32 {
        rect.map_or(0.0, |r| self.rect_size(r))
    }

    pub fn scroll_size(&self, extent: Option<&ScrollExtent>) -> f32 {
        match (self.axis, extent) {
            (_, None) => 0.0,
            (Axis::Horizontal, Some(e)) => e.width,
            (Axis::Vertical, Some(e)) => e.height,
        }
    }

    pub fn rect_size(&self, rect: &Bounds) -> f32 {
        match self.axis {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    pub fn main_axis_position(&self, p: PointerPosition) -> f32 {
        match self.axis {
            Axis::Horizontal => p.page_x,
            Axis::Vertical => p.page_y,
        }
    }

    pub fn cross_axis_position(&self, p: PointerPosition) -> f32 {
        match self.axis {
            Axis::Horizontal => p.page_y,
            Axis::Vertical => p.page_x,
        }
    }

    /// Pointer movement from `from` to `to`, expressed in translate space.
    pub fn main_axis_delta(&self, from: PointerPosition, to: PointerPosition) -> f32 {
        (self.main_axis_position(to) - self.main_axis_position(from)) * self.sign()
    }

    pub fn cross_axis_delta(&self, from: PointerPosition, to: PointerPosition) -> f32 {
        self.cross_axis_position(to) - self.cross_axis_position(from)
    }

    /// The `(x, y)` offset to apply to the slide strip for a translate value.
    pub fn transform_offset(&self, translate: f32) -> (f32, f32) {
        // Normalizes -0.0.
        let t = translate * self.sign() + 0.0;
        match self.axis {
            Axis::Horizontal => (t, 0.0),
            Axis::Vertical => (0.0, t),
        }
    }

    pub fn transform_string(&self, translate: f32) -> String {
        let (x, y) = self.transform_offset(translate);
        format!("translate3d({x}px, {y}px, 0px)")
    }
}

/// The DOM measurement collaborator.
///
/// Queried on demand; the engine keeps nothing beyond the sizes it was last told about.
pub trait Measure {
    fn container_rect(&self) -> Option<Bounds>;
    /// Number of slide elements currently rendered.
    fn element_count(&self) -> usize;
    /// Rect of the slide element at `dom_index`, `None` when it is not rendered.
    fn slide_rect(&self, dom_index: usize) -> Option<Bounds>;
}
