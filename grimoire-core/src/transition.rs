//! Settle transition description.
//!
//! The engine never animates on its own; it hands the surface a transition to
//! apply to the strip's transform and waits for the surface to report that it
//! finished.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::motion;

/// Timing curve of the settle transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// `cubic-bezier(x1, y1, x2, y2)`; x values must lie in `[0, 1]`.
    CubicBezier(f32, f32, f32, f32),
}

impl Default for Easing {
    fn default() -> Self {
        let (x1, y1, x2, y2) = motion::SETTLE_BEZIER;
        Easing::CubicBezier(x1, y1, x2, y2)
    }
}

impl Easing {
    pub fn is_valid(&self) -> bool {
        match *self {
            Easing::CubicBezier(x1, y1, x2, y2) => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }
}

/// CSS `<easing-function>` form.
impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::Ease => write!(f, "ease"),
            Easing::EaseIn => write!(f, "ease-in"),
            Easing::EaseOut => write!(f, "ease-out"),
            Easing::EaseInOut => write!(f, "ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transition {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_ms: motion::SETTLE_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl Transition {
    /// Value for the CSS `transition` property of the strip.
    pub fn css_value(&self) -> String {
        format!("transform {}ms {}", self.duration_ms, self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transition_matches_strip_css() {
        assert_eq!(
            Transition::default().css_value(),
            "transform 500ms cubic-bezier(0.77, 0, 0.175, 1)"
        );
    }

    #[test]
    fn bezier_x_outside_unit_range_is_invalid() {
        assert!(!Easing::CubicBezier(1.2, 0.0, 0.5, 1.0).is_valid());
        assert!(Easing::CubicBezier(0.1, -2.0, 0.5, 3.0).is_valid());
        assert!(Easing::EaseOut.is_valid());
    }

    #[test]
    fn easing_parses_from_config_json() {
        let t: Transition =
            serde_json::from_str(r#"{"durationMs": 300, "easing": "easeOut"}"#).expect("parses");
        assert_eq!(t.css_value(), "transform 300ms ease-out");

        let t: Transition =
            serde_json::from_str(r#"{"easing": {"cubicBezier": [0.2, 0.0, 0.2, 1.0]}}"#)
                .expect("parses");
        assert_eq!(t.duration_ms, 500);
        assert_eq!(t.easing, Easing::CubicBezier(0.2, 0.0, 0.2, 1.0));
    }
}
