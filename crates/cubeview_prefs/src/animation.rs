use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Preferences for animating moves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of one move, in seconds.
    pub twist_duration: f32,
    /// Whether to speed up moves while more are queued.
    pub dynamic_twist_speed: bool,
    /// Easing applied to the rotation angle of each move.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.25,
            dynamic_twist_speed: false,
            twist_interpolation: InterpolateFn::Lerp,
        }
    }
}

/// Easing curve that maps the elapsed fraction of a move to the fraction of
/// its angle that has been turned.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, strum::VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum InterpolateFn {
    /// Constant angular speed.
    #[default]
    Lerp,
    /// Half a cosine wave; slow at both ends.
    Cosine,
    /// Smoothstep; slow at both ends with a sharper middle.
    Cubic,
}
impl InterpolateFn {
    /// Returns the turned fraction for the elapsed fraction `t`, which must be
    /// in the range [0, 1]. The result is 0 at `t = 0` and 1 at `t = 1`.
    pub fn interpolate(self, t: f32) -> f32 {
        match self {
            Self::Lerp => t,
            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
            Self::Cubic => t * t * (3.0 - 2.0 * t),
        }
    }
}
