//! Sensor reading domains.

use std::fmt;

/// The closed numeric range of one sensor output channel.
///
/// Domains are decided entirely by sensor construction parameters,
/// never by runtime state, so downstream consumers can size and
/// normalize observation tensors before any episode runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl Domain {
    /// Build a domain from its bounds. `min` must not exceed `max`;
    /// violating that is a caller error and the bounds are swapped.
    pub fn of(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamp a value into this domain.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside this domain.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_bounds() {
        let d = Domain::of(-2.0, 2.0);
        assert_eq!(d.clamp(3.0), 2.0);
        assert_eq!(d.clamp(-5.0), -2.0);
        assert_eq!(d.clamp(0.5), 0.5);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let d = Domain::of(1.0, -1.0);
        assert_eq!(d.min, -1.0);
        assert_eq!(d.max, 1.0);
    }

    proptest! {
        #[test]
        fn clamped_value_is_always_contained(
            lo in -1e6f64..1e6,
            span in 0.0f64..1e6,
            v in -1e9f64..1e9,
        ) {
            let d = Domain::of(lo, lo + span);
            prop_assert!(d.contains(d.clamp(v)));
        }
    }
}
