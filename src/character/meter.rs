//! Bounded resource meter (health, energy).

use serde::{Deserialize, Serialize};

/// A value kept within `[0, max]`.
///
/// Every mutation clamps silently; a meter never reports an error.
///
/// ```
/// use deckfight::character::Meter;
///
/// let mut health = Meter::new(20);
/// assert_eq!(health.drain(25), 20);
/// assert_eq!(health.current(), 0);
/// assert_eq!(health.restore(7), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meter {
    current: i32,
    max: i32,
}

impl Meter {
    /// A full meter. Negative maxima are treated as 0.
    #[must_use]
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// A meter at `current`, clamped into range.
    #[must_use]
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Whether the meter is strictly below `fraction` of its maximum.
    #[must_use]
    pub fn below_fraction(&self, fraction: f64) -> bool {
        f64::from(self.current) < f64::from(self.max) * fraction
    }

    /// Whether the meter is strictly above `fraction` of its maximum.
    #[must_use]
    pub fn above_fraction(&self, fraction: f64) -> bool {
        f64::from(self.current) > f64::from(self.max) * fraction
    }

    /// Remove up to `amount`. Returns how much was actually removed.
    pub fn drain(&mut self, amount: i32) -> i32 {
        let removed = amount.max(0).min(self.current);
        self.current -= removed;
        removed
    }

    /// Add up to `amount`. Returns how much was actually added.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let added = amount.max(0).min(self.max.saturating_sub(self.current));
        self.current += added;
        added
    }

    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    pub fn fill(&mut self) {
        self.current = self.max;
    }

    /// Grow the maximum by `delta` without touching the current value.
    pub fn raise_max(&mut self, delta: i32) {
        self.max = self.max.saturating_add(delta).max(0);
        self.current = self.current.min(self.max);
    }
}

impl std::fmt::Display for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_clamps_at_zero() {
        let mut meter = Meter::new(10);
        assert_eq!(meter.drain(4), 4);
        assert_eq!(meter.drain(100), 6);
        assert!(meter.is_empty());
        assert_eq!(meter.drain(-5), 0);
    }

    #[test]
    fn test_restore_clamps_at_max() {
        let mut meter = Meter::with_current(3, 10);
        assert_eq!(meter.restore(20), 7);
        assert!(meter.is_full());
        assert_eq!(meter.restore(-2), 0);
    }

    #[test]
    fn test_with_current_clamps() {
        assert_eq!(Meter::with_current(50, 10).current(), 10);
        assert_eq!(Meter::with_current(-50, 10).current(), 0);
        assert_eq!(Meter::new(-3).max(), 0);
    }

    #[test]
    fn test_fractions() {
        let meter = Meter::with_current(39, 100);
        assert!(meter.below_fraction(0.4));
        assert!(!Meter::with_current(40, 100).below_fraction(0.4));
        assert!(Meter::with_current(51, 100).above_fraction(0.5));
        assert!(!Meter::with_current(50, 100).above_fraction(0.5));
    }

    #[test]
    fn test_raise_max() {
        let mut meter = Meter::with_current(40, 100);
        meter.raise_max(10);
        assert_eq!(meter.max(), 110);
        assert_eq!(meter.current(), 40);
    }

    #[test]
    fn test_display() {
        assert_eq!(Meter::with_current(9, 20).to_string(), "9/20");
    }
}
