use crate::EnvError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfig {
    /// Probability that the intended direction is taken. The remainder is split
    /// evenly between the two perpendicular directions.
    pub move_prob: f64,
    /// Reward for landing on any non-terminal cell.
    pub default_reward: f64,
}

impl EnvironmentConfig {
    pub fn with_move_prob(move_prob: f64) -> Self {
        EnvironmentConfig {
            move_prob,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if !(0.0..=1.0).contains(&self.move_prob) {
            return Err(EnvError::InvalidMoveProbability(self.move_prob));
        }
        if !self.default_reward.is_finite() {
            return Err(EnvError::InvalidDefaultReward(self.default_reward));
        }
        Ok(())
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            move_prob: 0.8,
            default_reward: -0.04,
        }
    }
}

#[test]
fn test_config_validate() {
    assert!(EnvironmentConfig::default().validate().is_ok());
    assert!(EnvironmentConfig::with_move_prob(0.0).validate().is_ok());
    assert!(EnvironmentConfig::with_move_prob(1.0).validate().is_ok());
    assert!(matches!(
        EnvironmentConfig::with_move_prob(1.5).validate(),
        Err(EnvError::InvalidMoveProbability(_))
    ));
    assert!(matches!(
        EnvironmentConfig::with_move_prob(-0.1).validate(),
        Err(EnvError::InvalidMoveProbability(_))
    ));
    assert!(matches!(
        EnvironmentConfig::with_move_prob(f64::NAN).validate(),
        Err(EnvError::InvalidMoveProbability(_))
    ));
    assert!(matches!(
        EnvironmentConfig {
            default_reward: f64::INFINITY,
            ..Default::default()
        }
        .validate(),
        Err(EnvError::InvalidDefaultReward(_))
    ));
}
