//! Polled stopwatch used for the start countdown and status expiry.

/// A period-based timer.
///
/// Time only accumulates while the timer is active. Once `period` has been
/// reached, the next [`Timer::consume_trigger`] reports a firing and carries
/// the overshoot into the following period. A timer with a trigger limit
/// deactivates itself after its last firing.
///
/// Callers must poll `consume_trigger` every step; firings are not queued
/// beyond one period's worth of overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    period: f64,
    elapsed: f64,
    max_triggers: Option<u32>,
    triggers: u32,
    active: bool,
}

impl Timer {
    /// Active timer that fires every `period` seconds, forever.
    pub(crate) fn repeating(period: f64) -> Self {
        Self {
            period,
            elapsed: 0.0,
            max_triggers: None,
            triggers: 0,
            active: true,
        }
    }

    /// Active timer that fires once and then deactivates.
    pub fn one_shot(period: f64) -> Self {
        Self {
            max_triggers: Some(1),
            ..Self::repeating(period)
        }
    }

    /// Same timer, starting inactive.
    pub fn paused(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Time left before the next firing (never negative).
    pub fn remaining(&self) -> f64 {
        (self.period - self.elapsed).max(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Accumulate `dt` seconds (ignored while inactive).
    pub fn advance(&mut self, dt: f64) {
        if self.active {
            self.elapsed += dt;
        }
    }

    /// Consume one firing if the period has elapsed.
    pub fn consume_trigger(&mut self) -> bool {
        if !self.active || self.elapsed < self.period {
            return false;
        }
        self.triggers += 1;
        self.elapsed = (self.elapsed - self.period).max(0.0);
        if self.max_triggers.is_some_and(|max| self.triggers >= max) {
            self.elapsed = 0.0;
            self.active = false;
        }
        true
    }

    /// Clear accumulated time and the trigger count. Activation is unchanged.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.triggers = 0;
    }
}
