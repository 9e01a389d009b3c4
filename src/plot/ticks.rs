//! Axis tick generation

use crate::types::Domain;

/// Roughly how many ticks an axis should carry
const TARGET_TICKS: f64 = 10.0;

/// Tick values for an axis spanning `domain`.
///
/// Steps are 1, 2 or 5 × 10ᵏ. Discrete axes never step below 1 and only
/// produce integers. A zero-width domain yields just its minimum.
pub fn axis_numbers_for_domain(domain: Domain<f64>, discrete: bool) -> Vec<f64> {
    let span = domain.span();
    if !domain.min.is_finite() || !domain.max.is_finite() {
        return Vec::new();
    }
    if span <= 0.0 {
        return vec![domain.min];
    }

    let (mut nice, mut exponent) = nice_step(span / TARGET_TICKS);
    if discrete && exponent < 0 {
        nice = 1;
        exponent = 0;
    }

    // work in integer multiples of the step so decimal steps stay exact
    let step = f64::from(nice) * 10f64.powi(exponent);
    let first = (domain.min / step).ceil() as i64;
    let last = (domain.max / step).floor() as i64;
    let decimals = (-exponent).max(0);
    let scale = 10f64.powi(decimals);

    (first..=last)
        .map(|k| {
            let value = if exponent < 0 {
                (k * i64::from(nice)) as f64 / scale
            } else {
                k as f64 * step
            };
            if value == 0.0 {
                0.0
            } else {
                value
            }
        })
        .collect()
}

/// Decompose a raw step into `(1 | 2 | 5, exponent)`, rounding up
fn nice_step(raw: f64) -> (u32, i32) {
    let mut exponent = raw.log10().floor() as i32;
    let fraction = raw / 10f64.powi(exponent);
    let nice = if fraction <= 1.0 {
        1
    } else if fraction <= 2.0 {
        2
    } else if fraction <= 5.0 {
        5
    } else {
        exponent += 1;
        1
    };
    (nice, exponent)
}

/// Text shown for a tick value
pub fn format_tick(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_steps() {
        let ticks = axis_numbers_for_domain(Domain::new(0.0, 4.8), true);
        assert_eq!(ticks, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let ticks = axis_numbers_for_domain(Domain::new(0.0, 100.8), true);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks[1], 20.0);
        assert_eq!(ticks.last(), Some(&100.0));
    }

    #[test]
    fn test_continuous_decimal_steps() {
        let ticks = axis_numbers_for_domain(Domain::new(0.0, 2.25), false);
        assert_eq!(ticks, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        let ticks = axis_numbers_for_domain(Domain::new(0.0, 0.9), false);
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(format_tick(ticks[3]), "0.3");
    }

    #[test]
    fn test_discrete_never_fractional() {
        let ticks = axis_numbers_for_domain(Domain::new(0.0, 0.8), true);
        assert_eq!(ticks, vec![0.0]);
        assert!(ticks.iter().all(|v| v.fract() == 0.0));
    }

    #[test]
    fn test_zero_width_domain() {
        assert_eq!(axis_numbers_for_domain(Domain::new(3.0, 3.0), false), vec![3.0]);
        assert_eq!(axis_numbers_for_domain(Domain::new(0.0, 0.0), true), vec![0.0]);
    }

    #[test]
    fn test_offset_domain() {
        let ticks = axis_numbers_for_domain(Domain::new(13.0, 57.0), true);
        assert_eq!(ticks, vec![15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(5.0), "5");
        assert_eq!(format_tick(0.0), "0");
    }
}
