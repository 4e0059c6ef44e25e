/// Accessibility attributes a renderer should put on a slide element.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideAttributes {
    pub role: String,
    /// `"{index + 1} of {total}"`.
    pub aria_label: String,
    /// `0` for the active slide, `-1` otherwise.
    pub tab_index: i32,
}

impl SlideAttributes {
    pub(crate) fn new(index: usize, total: usize, active: bool) -> Self {
        Self {
            role: "group".to_string(),
            aria_label: format!("{} of {}", index + 1, total),
            tab_index: if active { 0 } else { -1 },
        }
    }
}

/// One rendered slide, in DOM order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedSlide {
    /// Logical slide index.
    pub index: usize,
    pub dom_index: usize,
    /// Offset of the slide from the start of the strip.
    pub start: f32,
    pub size: f32,
    /// Translate at which this slide is the active one.
    pub translate: f32,
    /// Whether the slide's images should load eagerly.
    pub eager: bool,
    pub disabled: bool,
    pub attributes: SlideAttributes,
}

/// A serializable snapshot of everything a renderer needs for one frame.
///
/// This is useful for driving a view layer (or restoring UI state) without coupling the engine
/// to any specific UI framework.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderState {
    pub active_index: Option<usize>,
    pub total_slides: usize,
    pub rendered_indices: Vec<usize>,
    pub slides: Vec<RenderedSlide>,
    pub translate: f32,
    /// CSS transform for the strip, e.g. `translate3d(-300px, 0px, 0px)`.
    pub transform: String,
    pub reached_start: bool,
    pub reached_end: bool,
}

/// The translate change caused by the most recent committed navigation.
///
/// Adapters animate from `from_translate` to `to_translate`; the engine has already committed
/// `to_translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub from_index: Option<usize>,
    pub to_index: usize,
    /// Pre-navigation translate, already compensated for any window changes.
    pub from_translate: f32,
    pub to_translate: f32,
}
