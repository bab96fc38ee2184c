// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions for animated transitions.
//!
//! An easing maps normalized animation time `t` in `[0, 1]` to a progress
//! value, with `f(0) = 0` and `f(1) = 1`. Callers are expected to clamp `t`
//! before applying an easing; the functions themselves are plain polynomial
//! maps and stay `no_std`-friendly.

/// An easing function over normalized time.
pub type Easing = fn(f64) -> f64;

/// Constant-velocity progression.
#[must_use]
#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Accelerating from zero velocity.
#[must_use]
#[inline]
pub fn quadratic_in(t: f64) -> f64 {
    t * t
}

/// Decelerating to zero velocity.
#[must_use]
#[inline]
pub fn quadratic_out(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Accelerating until halfway, then decelerating.
#[must_use]
#[inline]
pub fn quadratic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let k = 2.0 * t - 1.0;
        -0.5 * (k * (k - 2.0) - 1.0)
    }
}

/// Accelerating from zero velocity, cubic curve.
#[must_use]
#[inline]
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

/// Decelerating to zero velocity, cubic curve.
#[must_use]
#[inline]
pub fn cubic_out(t: f64) -> f64 {
    let k = t - 1.0;
    k * k * k + 1.0
}

/// Accelerating until halfway, then decelerating, cubic curve.
#[must_use]
#[inline]
pub fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = 2.0 * t - 2.0;
        0.5 * (k * k * k + 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[(&str, Easing)] = &[
        ("linear", linear),
        ("quadratic_in", quadratic_in),
        ("quadratic_out", quadratic_out),
        ("quadratic_in_out", quadratic_in_out),
        ("cubic_in", cubic_in),
        ("cubic_out", cubic_out),
        ("cubic_in_out", cubic_in_out),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for (name, easing) in ALL {
            assert!(easing(0.0).abs() < 1e-12, "{name}(0) should be 0");
            assert!((easing(1.0) - 1.0).abs() < 1e-12, "{name}(1) should be 1");
        }
    }

    #[test]
    fn monotonically_increasing_on_unit_interval() {
        for (name, easing) in ALL {
            let mut prev = easing(0.0);
            for i in 1..=100 {
                let t = f64::from(i) / 100.0;
                let value = easing(t);
                assert!(value >= prev, "{name} should not decrease at t={t}");
                prev = value;
            }
        }
    }

    #[test]
    fn in_out_curves_hit_half_at_half() {
        assert!((quadratic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!((cubic_in_out(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn in_curves_start_slow_out_curves_start_fast() {
        assert!(quadratic_in(0.25) < linear(0.25));
        assert!(quadratic_out(0.25) > linear(0.25));
        assert!(cubic_in(0.25) < quadratic_in(0.25));
        assert!(cubic_out(0.25) > quadratic_out(0.25));
    }
}
