//! Time-based attribute transitions.
//!
//! Transitions are driven by an explicit clock (milliseconds, supplied by
//! the caller) rather than a timer, so the same code runs under a frame loop
//! and in tests.

use crate::render::element::Attrs;

/// Shared duration for every enter/update/exit transition, in milliseconds
pub const DEFAULT_TRANSITION_MS: f64 = 700.0;

/// Easing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Slow start and end
    #[default]
    CubicInOut,
}

impl Easing {
    /// Map normalized time (0.0 to 1.0) to eased progress
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// An in-flight move from one attribute set to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Attrs,
    pub to: Attrs,
    /// Clock value when the transition began
    pub start: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl Transition {
    pub fn new(from: Attrs, to: Attrs, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized time elapsed, 0.0 to 1.0
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolated attributes at `now`
    pub fn sample(&self, now: f64) -> Attrs {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(x: f64, opacity: f64) -> Attrs {
        Attrs::new(x, 0.0, 1.0, 1.0, opacity)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::CubicInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(0.5), 0.5);
        }
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_sample_progression() {
        let t = Transition::new(attrs(0.0, 0.0), attrs(100.0, 1.0), 1000.0, 700.0)
            .with_easing(Easing::Linear);
        assert_eq!(t.sample(900.0), attrs(0.0, 0.0));
        assert_eq!(t.sample(1350.0), attrs(50.0, 0.5));
        assert_eq!(t.sample(1700.0), attrs(100.0, 1.0));
        assert!(!t.is_complete(1699.0));
        assert!(t.is_complete(1700.0));
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let t = Transition::new(attrs(0.0, 0.0), attrs(5.0, 1.0), 10.0, 0.0);
        assert!(t.is_complete(10.0));
        assert_eq!(t.sample(10.0), attrs(5.0, 1.0));
    }
}
