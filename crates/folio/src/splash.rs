//! Loading screen timer.
//!
//! The timer does not sleep by itself. Whoever owns it calls [`LoadingTimer::tick`]
//! every [`LoadingTimer::interval`], which keeps it usable from any event loop.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplashEvent {
    /// Current value, 0 to 100.
    Progress(f32),
    /// Reported exactly once, on the tick that reaches 100.
    Complete,
    /// Finished or cancelled; nothing more will happen.
    Idle,
}

#[derive(Debug, Clone)]
pub struct LoadingTimer {
    duration: Duration,
    steps: u32,
    taken: u32,
    completion_delay: Duration,
    done: bool,
}

impl Default for LoadingTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500), 60)
    }
}

impl LoadingTimer {
    pub fn new(duration: Duration, steps: u32) -> Self {
        Self {
            duration,
            steps: steps.max(1),
            taken: 0,
            completion_delay: Duration::from_millis(400),
            done: false,
        }
    }

    /// Time between two ticks.
    pub fn interval(&self) -> Duration {
        self.duration / self.steps
    }

    /// Pause after completion before the caller moves on.
    pub fn completion_delay(&self) -> Duration {
        self.completion_delay
    }

    pub fn value(&self) -> f32 {
        (self.taken as f32 / self.steps as f32 * 100.0).min(100.0)
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    pub fn tick(&mut self) -> SplashEvent {
        if self.done {
            return SplashEvent::Idle;
        }
        self.taken += 1;
        if self.taken >= self.steps {
            self.done = true;
            log::debug!("splash complete after {} ticks", self.taken);
            return SplashEvent::Complete;
        }
        SplashEvent::Progress(self.value())
    }

    /// Stop early. A cancelled timer never reports completion.
    pub fn cancel(&mut self) {
        if !self.done {
            log::trace!("splash cancelled at {:.0}%", self.value());
        }
        self.done = true;
    }
}
