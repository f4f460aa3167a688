//! Match configuration.
//!
//! All tunable physics constants live here, validated once at setup.
//! Defaults reproduce the traditional board feel: coins glide roughly
//! a board-length from a full-power strike and settle within a few
//! hundred steps.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Recognized configuration options for a match.
///
/// Velocities are in board units per simulation step; the friction and
/// restitution coefficients are dimensionless per-step multipliers.
///
/// ## Example
///
/// ```
/// use carrom_core::core::MatchConfig;
///
/// let config = MatchConfig::new(4).with_friction(0.97);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of players: 2 or 4.
    pub player_count: usize,

    /// Per-step speed retention, in (0, 1). Lower stops bodies faster.
    pub friction_coefficient: f32,

    /// Fraction of normal speed retained on a wall bounce, in (0, 1].
    pub restitution_coefficient: f32,

    /// Speeds below this are clamped to zero, guaranteeing the stroke
    /// terminates. Must be positive.
    pub rest_speed_epsilon: f32,

    /// Scales how deep a body's center must sit inside a pocket before
    /// capture: capture at `pocket_radius - body_radius * leniency`.
    /// In [0, 1]; 0 captures at the pocket rim.
    pub capture_leniency: f32,

    /// Striker launch speed at full power.
    pub max_striker_speed: f32,
}

impl MatchConfig {
    /// Create a configuration with default physics constants.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            friction_coefficient: 0.98,
            restitution_coefficient: 0.8,
            rest_speed_epsilon: 0.1,
            capture_leniency: 0.25,
            max_striker_speed: 20.0,
        }
    }

    /// Set the friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction_coefficient = friction;
        self
    }

    /// Set the wall restitution coefficient.
    #[must_use]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution_coefficient = restitution;
        self
    }

    /// Set the rest speed epsilon.
    #[must_use]
    pub fn with_rest_epsilon(mut self, epsilon: f32) -> Self {
        self.rest_speed_epsilon = epsilon;
        self
    }

    /// Set the pocket capture leniency.
    #[must_use]
    pub fn with_capture_leniency(mut self, leniency: f32) -> Self {
        self.capture_leniency = leniency;
        self
    }

    /// Set the maximum striker launch speed.
    #[must_use]
    pub fn with_max_striker_speed(mut self, speed: f32) -> Self {
        self.max_striker_speed = speed;
        self
    }

    /// Validate every constant. Called once at match setup; a failure here
    /// is fatal at startup, never mid-match.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_count != 2 && self.player_count != 4 {
            return Err(GameError::InvalidConfiguration {
                field: "player_count",
                value: self.player_count as f64,
            });
        }
        Self::check_range(
            "friction_coefficient",
            self.friction_coefficient,
            |v| v > 0.0 && v < 1.0,
        )?;
        Self::check_range(
            "restitution_coefficient",
            self.restitution_coefficient,
            |v| v > 0.0 && v <= 1.0,
        )?;
        Self::check_range("rest_speed_epsilon", self.rest_speed_epsilon, |v| v > 0.0)?;
        Self::check_range("capture_leniency", self.capture_leniency, |v| {
            (0.0..=1.0).contains(&v)
        })?;
        Self::check_range("max_striker_speed", self.max_striker_speed, |v| v > 0.0)?;
        Ok(())
    }

    fn check_range(
        field: &'static str,
        value: f32,
        ok: impl Fn(f32) -> bool,
    ) -> Result<(), GameError> {
        if value.is_finite() && ok(value) {
            Ok(())
        } else {
            Err(GameError::InvalidConfiguration {
                field,
                value: value as f64,
            })
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(MatchConfig::new(2).validate().is_ok());
        assert!(MatchConfig::new(4).validate().is_ok());
    }

    #[test]
    fn test_player_count_rejected() {
        for count in [0, 1, 3, 5] {
            let err = MatchConfig::new(count).validate().unwrap_err();
            assert!(matches!(
                err,
                GameError::InvalidConfiguration { field: "player_count", .. }
            ));
        }
    }

    #[test]
    fn test_friction_bounds() {
        assert!(MatchConfig::new(2).with_friction(0.0).validate().is_err());
        assert!(MatchConfig::new(2).with_friction(1.0).validate().is_err());
        assert!(MatchConfig::new(2).with_friction(0.5).validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(MatchConfig::new(2).with_friction(f32::NAN).validate().is_err());
        assert!(MatchConfig::new(2)
            .with_max_striker_speed(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_restitution_allows_perfectly_elastic() {
        assert!(MatchConfig::new(2).with_restitution(1.0).validate().is_ok());
        assert!(MatchConfig::new(2).with_restitution(1.01).validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = MatchConfig::new(4).with_capture_leniency(0.5);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
