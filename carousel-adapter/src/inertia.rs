use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use carousel::{Carousel, Inertia};

/// A shareable flag that stops a running [`InertiaDriver`].
///
/// Cloning shares the flag, so a UI callback can hold one half while the frame loop owns the
/// driver.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Drives a free-mode [`Inertia`] one frame at a time until it stops or is cancelled.
///
/// Cancelling leaves the strip wherever the last frame put it; nothing snaps back.
#[derive(Clone, Debug)]
pub struct InertiaDriver {
    inertia: Inertia,
    token: CancellationToken,
}

impl InertiaDriver {
    pub fn new(inertia: Inertia) -> Self {
        Self {
            inertia,
            token: CancellationToken::new(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn velocity(&self) -> f32 {
        self.inertia.velocity()
    }

    pub fn is_running(&self) -> bool {
        !self.inertia.is_finished() && !self.token.is_cancelled()
    }

    /// Runs one frame. Returns `false` once the glide has stopped or was cancelled.
    pub fn frame(&mut self, carousel: &mut Carousel) -> bool {
        if self.token.is_cancelled() {
            atrace!("inertia cancelled");
            return false;
        }
        self.inertia.step(carousel)
    }
}
