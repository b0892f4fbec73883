//! Global simulation parameters shared by the live system and every
//! isolated forecast context.

use augur_core::Vec2;

/// World-level simulation parameters.
///
/// A forecast context must be configured with the same parameters the
/// live system uses, otherwise its predictions describe a different
/// world. The horizon of a forecast couples to step count through
/// [`steps_for_horizon`](WorldParams::steps_for_horizon), never to
/// wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldParams {
    /// Gravity vector. Default `(0, 981)`: y increases downward.
    pub gravity: Vec2,
    /// Fixed step rate in Hz. Default: 60.
    pub step_rate_hz: f32,
    /// Linear speed below which a body may be judged at rest. Default: 0.4.
    pub settle_linear_threshold: f32,
    /// Angular speed below which a body may be judged at rest. Default: 0.5.
    pub settle_angular_threshold: f32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 981.0),
            step_rate_hz: 60.0,
            settle_linear_threshold: 0.4,
            settle_angular_threshold: 0.5,
        }
    }
}

impl WorldParams {
    /// The fixed timestep, in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.step_rate_hz
    }

    /// Number of fixed steps covering `horizon_seconds`.
    ///
    /// Rounded to the nearest whole step; negative or NaN horizons map
    /// to zero steps.
    pub fn steps_for_horizon(&self, horizon_seconds: f32) -> u32 {
        let steps = (horizon_seconds * self.step_rate_hz).round();
        if steps.is_finite() && steps > 0.0 {
            steps as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_couples_to_step_count() {
        let params = WorldParams::default();
        assert_eq!(params.steps_for_horizon(1.0), 60);
        assert_eq!(params.steps_for_horizon(0.5), 30);
        assert_eq!(params.steps_for_horizon(0.0), 0);
    }

    #[test]
    fn pathological_horizons_map_to_zero_steps() {
        let params = WorldParams::default();
        assert_eq!(params.steps_for_horizon(-2.0), 0);
        assert_eq!(params.steps_for_horizon(f32::NAN), 0);
    }

    #[test]
    fn rounding_is_to_nearest_step() {
        let params = WorldParams::default();
        // 0.49 s at 60 Hz is 29.4 steps.
        assert_eq!(params.steps_for_horizon(0.49), 29);
    }
}
