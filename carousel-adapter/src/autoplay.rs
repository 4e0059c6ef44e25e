use carousel::AutoplayOptions;

/// Why autoplay is paused. Reasons stack: autoplay resumes once every reason is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PauseReason {
    Hover,
    Focus,
    /// A pointer gesture is in progress.
    Interaction,
}

/// Which way autoplay wants to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoplayStep {
    Next,
    Prev,
}

/// A pausable autoplay timer.
///
/// It never moves the carousel itself; [`Autoplay::tick`] reports when a step is due.
#[derive(Clone, Copy, Debug)]
pub struct Autoplay {
    options: AutoplayOptions,
    stopped: bool,
    hover: bool,
    focus: bool,
    interaction: bool,
    deadline_ms: Option<u64>,
}

impl Autoplay {
    pub fn new(options: AutoplayOptions) -> Self {
        Self {
            options,
            stopped: false,
            hover: false,
            focus: false,
            interaction: false,
            deadline_ms: None,
        }
    }

    pub fn options(&self) -> &AutoplayOptions {
        &self.options
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_paused(&self) -> bool {
        self.hover || self.focus || self.interaction
    }

    /// Whether a step can become due.
    pub fn is_running(&self) -> bool {
        !self.stopped && !self.is_paused()
    }

    /// Hover and focus only pause when the matching option is set.
    pub fn pause(&mut self, reason: PauseReason) {
        let flag = match reason {
            PauseReason::Hover if self.options.pause_on_hover => &mut self.hover,
            PauseReason::Focus if self.options.pause_on_focus => &mut self.focus,
            PauseReason::Interaction => &mut self.interaction,
            _ => return,
        };
        *flag = true;
        self.deadline_ms = None;
        atrace!(?reason, "autoplay paused");
    }

    /// Clears `reason`; when nothing else holds autoplay, a full delay starts at `now_ms`.
    pub fn resume(&mut self, reason: PauseReason, now_ms: u64) {
        match reason {
            PauseReason::Hover => self.hover = false,
            PauseReason::Focus => self.focus = false,
            PauseReason::Interaction => self.interaction = false,
        }
        if self.is_running() {
            self.deadline_ms = Some(now_ms.saturating_add(self.options.delay_ms));
        }
    }

    /// Call when the user navigated. Restarts the delay, or stops for good with
    /// `stop_on_interaction`.
    pub fn notify_interaction(&mut self, now_ms: u64) {
        if self.options.stop_on_interaction {
            adebug!("autoplay stopped by interaction");
            self.stop();
        } else if self.is_running() {
            self.deadline_ms = Some(now_ms.saturating_add(self.options.delay_ms));
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.deadline_ms = None;
    }

    /// Restarts a stopped timer.
    pub fn start(&mut self, now_ms: u64) {
        self.stopped = false;
        self.deadline_ms = if self.is_paused() {
            None
        } else {
            Some(now_ms.saturating_add(self.options.delay_ms))
        };
    }

    /// Advances the timer. Returns the step to take when one is due.
    ///
    /// The first tick of a running timer only arms it.
    pub fn tick(&mut self, now_ms: u64) -> Option<AutoplayStep> {
        if !self.is_running() {
            return None;
        }
        let Some(deadline) = self.deadline_ms else {
            self.deadline_ms = Some(now_ms.saturating_add(self.options.delay_ms));
            return None;
        };
        if now_ms < deadline {
            return None;
        }
        self.deadline_ms = Some(now_ms.saturating_add(self.options.delay_ms));
        Some(if self.options.reverse {
            AutoplayStep::Prev
        } else {
            AutoplayStep::Next
        })
    }
}
