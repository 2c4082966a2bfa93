//! Easing functions for tween interpolation.
//!
//! All functions take a normalized time in `[0, 1]` and return an eased
//! progress value in `[0, 1]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in-out: slow at both ends, symmetric around t = 0.5.
    QuadraticInOut,
    /// Cubic ease-in-out: a steeper variant of [`Self::QuadraticInOut`].
    CubicInOut,
}

impl EasingFunction {
    /// Default easing for carousel tweens: quadratic ease-in-out.
    pub const DEFAULT: Self = Self::QuadraticInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn quadratic_in_out_is_symmetric() {
        let f = EasingFunction::QuadraticInOut;
        assert_eq!(f.evaluate(0.0), 0.0);
        assert_eq!(f.evaluate(0.5), 0.5);
        assert_eq!(f.evaluate(1.0), 1.0);
        assert_eq!(f.evaluate(0.25), 0.125);
        assert!((f.evaluate(0.75) - 0.875).abs() < 1e-6);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let mirrored = 1.0 - f.evaluate(1.0 - t);
            assert!((f.evaluate(t) - mirrored).abs() < 1e-6);
        }
    }

    #[test]
    fn cubic_in_out_is_slower_at_the_start() {
        let quad = EasingFunction::QuadraticInOut;
        let cubic = EasingFunction::CubicInOut;
        assert!(cubic.evaluate(0.2) < quad.evaluate(0.2));
        assert!((cubic.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!((cubic.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn input_is_clamped() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let in_out = EasingFunction::QuadraticInOut;
        assert_eq!(in_out.evaluate(-3.0), 0.0);
        assert_eq!(in_out.evaluate(7.0), 1.0);
    }

    #[test]
    fn only_carousel_curves_parse() {
        for name in ["linear", "quadratic_in_out", "cubic_in_out"] {
            let parsed: Result<EasingFunction, _> =
                serde_json::from_str(&format!("\"{name}\""));
            assert!(parsed.is_ok(), "{name} should parse");
        }
        for name in ["quadratic_in", "quadratic_out", "sqrt_out"] {
            let parsed: Result<EasingFunction, _> =
                serde_json::from_str(&format!("\"{name}\""));
            assert!(parsed.is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn default_is_quadratic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticInOut);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&EasingFunction::QuadraticInOut)
            .unwrap_or_default();
        assert_eq!(json, "\"quadratic_in_out\"");
    }
}
