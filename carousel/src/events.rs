use std::collections::BTreeSet;

/// Notifications raised by the engine.
///
/// Events are queued while an engine call runs and delivered to
/// [`crate::CarouselOptions::on_event`] once the call (or the outermost
/// [`crate::Carousel::batch_update`]) has committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarouselEvent {
    /// The active slide changed; carries the new logical index.
    SlideChanged(usize),
    ReachedStart,
    ReachedEnd,
    SlideNext,
    SlidePrev,
    /// Every eagerly loaded image of the initial window finished loading.
    ImagesReady,
}

/// Tracks image loads for the slides of the initial eager window.
#[derive(Clone, Debug, Default)]
pub(crate) struct ImageReadiness {
    expected: BTreeSet<usize>,
    loaded: BTreeSet<usize>,
    fired: bool,
}

impl ImageReadiness {
    /// Replaces the set of slides to wait for. Ignored once `ImagesReady` has fired.
    pub(crate) fn set_expected(&mut self, indices: impl IntoIterator<Item = usize>) {
        if self.fired {
            return;
        }
        self.expected = indices.into_iter().collect();
    }

    /// Records a load. Returns `true` exactly once: when the last expected image arrives.
    pub(crate) fn mark_loaded(&mut self, index: usize) -> bool {
        if self.fired {
            return false;
        }
        self.loaded.insert(index);
        self.check()
    }

    /// Re-evaluates readiness, e.g. after the expected set changed.
    pub(crate) fn check(&mut self) -> bool {
        if self.fired || self.expected.is_empty() {
            return false;
        }
        if self.expected.is_subset(&self.loaded) {
            self.fired = true;
            self.loaded.clear();
            return true;
        }
        false
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.fired
    }
}
