//! Saturating debounce counter
//!
//! A leaky integrator: each sample moves the count one step toward the
//! sampled state, clamped to `[0, max]`. Bounce can only move it by one per
//! tick, so only a sustained level reaches either bound.
//!
//! Release is reported only for a counter that saturated first, so a
//! glitch that lifts the count off zero and drops it back is not a release.

/// Bound reached by a counter on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterEdge {
    /// Count rose to the upper bound
    Saturated,
    /// Count decayed to zero after saturating
    Released,
}

/// Debounce counter for one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceCounter {
    count: u16,
    max: u16,
    /// Saturated since the count last sat at zero
    armed: bool,
}

impl DebounceCounter {
    /// Create a counter at zero with the given upper bound
    pub const fn new(max: u16) -> Self {
        Self {
            count: 0,
            max,
            armed: false,
        }
    }

    /// Current count
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Check if a decay to zero would be reported as a release
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed one sample
    ///
    /// Returns the bound the count arrived at on this sample, if any.
    /// Staying at a bound is not reported again, and reaching zero is only
    /// reported after the count has saturated.
    pub fn step(&mut self, active: bool) -> Option<CounterEdge> {
        let previous = self.count;

        self.count = if active {
            self.count.saturating_add(1).min(self.max)
        } else {
            self.count.saturating_sub(1)
        };

        if self.count == previous {
            None
        } else if self.count == self.max {
            self.armed = true;
            Some(CounterEdge::Saturated)
        } else if self.count == 0 && self.armed {
            self.armed = false;
            Some(CounterEdge::Released)
        } else {
            None
        }
    }
}
