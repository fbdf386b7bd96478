//! Trigger countdown state machine
//!
//! `Idle` until a trigger arms it with a sample count, then one tick per
//! processed sample. The tick that finds the counter at zero fires and
//! returns to `Idle`. Re-arming while counting restarts the count: the most
//! recent trigger wins, nothing is queued.

/// Countdown from trigger to firing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerCountdown {
    remaining: Option<usize>,
}

impl TriggerCountdown {
    /// Idle countdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) counting down from `samples`
    #[inline]
    pub fn arm(&mut self, samples: usize) {
        self.remaining = Some(samples);
    }

    /// Advance by one sample; returns `true` on the firing tick
    #[inline]
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(0) => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }

    /// Samples left before the firing tick, `None` when idle
    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Whether no analysis is pending
    pub fn is_idle(&self) -> bool {
        self.remaining.is_none()
    }

    /// Drop any pending analysis
    pub fn cancel(&mut self) {
        self.remaining = None;
    }
}
