//! Easing curves.
//!
//! An easing maps normalized progress `t ∈ [0, 1]` to an eased progress. Particles
//! and behaviours derive their energy as `max(1 - easing(age / life), 0)`.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function selector.
///
/// # Example
///
/// ```ignore
/// let halfway = Easing::InQuad.apply(0.5); // 0.25
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
}

impl Easing {
    /// Evaluate the curve at `t`.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,

            Easing::InQuad => t * t,
            Easing::OutQuad => -(t * (t - 2.0)),
            Easing::InOutQuad => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t
                } else {
                    let t = t - 1.0;
                    -0.5 * (t * (t - 2.0) - 1.0)
                }
            }

            Easing::InCubic => t * t * t,
            Easing::OutCubic => (t - 1.0).powi(3) + 1.0,
            Easing::InOutCubic => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t.powi(3)
                } else {
                    0.5 * ((t - 2.0).powi(3) + 2.0)
                }
            }

            Easing::InQuart => t.powi(4),
            Easing::OutQuart => -((t - 1.0).powi(4) - 1.0),
            Easing::InOutQuart => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t.powi(4)
                } else {
                    -0.5 * ((t - 2.0).powi(4) - 2.0)
                }
            }

            Easing::InSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::OutSine => (t * PI / 2.0).sin(),
            Easing::InOutSine => -0.5 * ((PI * t).cos() - 1.0),

            Easing::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Easing::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::InOutExpo => {
                if t == 0.0 {
                    return 0.0;
                }
                if t == 1.0 {
                    return 1.0;
                }
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * 2f32.powf(10.0 * (t - 1.0))
                } else {
                    0.5 * (2.0 - 2f32.powf(-10.0 * (t - 1.0)))
                }
            }

            Easing::InCirc => -((1.0 - t * t).max(0.0).sqrt() - 1.0),
            Easing::OutCirc => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Easing::InOutCirc => {
                let t = t * 2.0;
                if t < 1.0 {
                    -0.5 * ((1.0 - t * t).max(0.0).sqrt() - 1.0)
                } else {
                    let t = t - 2.0;
                    0.5 * ((1.0 - t * t).max(0.0).sqrt() + 1.0)
                }
            }

            Easing::InBack => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
            Easing::OutBack => {
                let t = t - 1.0;
                t * t * ((BACK_OVERSHOOT + 1.0) * t + BACK_OVERSHOOT) + 1.0
            }
            Easing::InOutBack => {
                let s = BACK_OVERSHOOT * 1.525;
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * (t * t * ((s + 1.0) * t - s))
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
                }
            }
        }
    }

    /// Look up an easing by its conventional name (`"easeLinear"`, `"easeOutQuad"`, ...).
    ///
    /// Both the `ease`-prefixed and the bare variant names are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("ease").unwrap_or(name);
        let easing = match bare {
            "Linear" => Easing::Linear,
            "InQuad" => Easing::InQuad,
            "OutQuad" => Easing::OutQuad,
            "InOutQuad" => Easing::InOutQuad,
            "InCubic" => Easing::InCubic,
            "OutCubic" => Easing::OutCubic,
            "InOutCubic" => Easing::InOutCubic,
            "InQuart" => Easing::InQuart,
            "OutQuart" => Easing::OutQuart,
            "InOutQuart" => Easing::InOutQuart,
            "InSine" => Easing::InSine,
            "OutSine" => Easing::OutSine,
            "InOutSine" => Easing::InOutSine,
            "InExpo" => Easing::InExpo,
            "OutExpo" => Easing::OutExpo,
            "InOutExpo" => Easing::InOutExpo,
            "InCirc" => Easing::InCirc,
            "OutCirc" => Easing::OutCirc,
            "InOutCirc" => Easing::InOutCirc,
            "InBack" => Easing::InBack,
            "OutBack" => Easing::OutBack,
            "InOutBack" => Easing::InOutBack,
            _ => return None,
        };
        Some(easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 22] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-3, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_eq!(Easing::Linear.apply(t), t);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("easeLinear"), Some(Easing::Linear));
        assert_eq!(Easing::from_name("OutBack"), Some(Easing::OutBack));
        assert_eq!(Easing::from_name("easeWobble"), None);
    }
}
