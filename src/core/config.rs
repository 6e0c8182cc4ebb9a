//! Game configuration.
//!
//! The defaults are the six-player rules: mission sizes `[2, 3, 4, 3, 4]`,
//! five consecutive rejections hand Evil the game, three missions decide it.

use serde::{Deserialize, Serialize};

use super::agent::AGENT_COUNT;
use super::error::ConfigError;

/// Number of missions in a game.
pub const MISSION_COUNT: usize = 5;

/// Team sizes for missions 1-5 in a six-player game.
pub const SIX_PLAYER_MISSION_SIZES: [usize; MISSION_COUNT] = [2, 3, 4, 3, 4];

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Required team size per mission (index = mission number - 1).
    pub mission_sizes: [usize; MISSION_COUNT],

    /// Consecutive rejected proposals that end the game in Evil's favour.
    pub max_rejections: u8,

    /// Successful (or failed) missions needed to decide the mission phase.
    pub missions_to_win: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mission_sizes: SIX_PLAYER_MISSION_SIZES,
            max_rejections: 5,
            missions_to_win: 3,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mission_sizes(mut self, sizes: [usize; MISSION_COUNT]) -> Self {
        self.mission_sizes = sizes;
        self
    }

    #[must_use]
    pub fn with_max_rejections(mut self, max: u8) -> Self {
        self.max_rejections = max;
        self
    }

    #[must_use]
    pub fn with_missions_to_win(mut self, missions: u8) -> Self {
        self.missions_to_win = missions;
        self
    }

    /// Team size for a 1-based mission number. `None` past the last mission.
    #[must_use]
    pub fn mission_size(&self, mission_number: u8) -> Option<usize> {
        let index = usize::from(mission_number).checked_sub(1)?;
        self.mission_sizes.get(index).copied()
    }

    /// Number of seated agents. Fixed by the roster.
    #[must_use]
    pub const fn agent_count(&self) -> usize {
        AGENT_COUNT
    }

    /// Check the configuration can produce a finishable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.agent_count();
        for (i, &size) in self.mission_sizes.iter().enumerate() {
            if size == 0 || size > max {
                return Err(ConfigError::MissionSize {
                    mission: i + 1,
                    size,
                    max,
                });
            }
        }
        if self.max_rejections == 0 {
            return Err(ConfigError::MaxRejections);
        }
        // Five missions: one side must reach the target.
        if self.missions_to_win == 0 || usize::from(self.missions_to_win) > MISSION_COUNT.div_ceil(2) {
            return Err(ConfigError::MissionsToWin(self.missions_to_win));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.mission_sizes, [2, 3, 4, 3, 4]);
        assert_eq!(config.max_rejections, 5);
        assert_eq!(config.missions_to_win, 3);
        assert_eq!(config.agent_count(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mission_size_lookup() {
        let config = GameConfig::default();

        assert_eq!(config.mission_size(1), Some(2));
        assert_eq!(config.mission_size(3), Some(4));
        assert_eq!(config.mission_size(5), Some(4));
        assert_eq!(config.mission_size(0), None);
        assert_eq!(config.mission_size(6), None);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_mission_sizes([1, 1, 1, 1, 1])
            .with_max_rejections(2)
            .with_missions_to_win(1);

        assert_eq!(config.mission_size(4), Some(1));
        assert_eq!(config.max_rejections, 2);
        assert_eq!(config.missions_to_win, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let config = GameConfig::new().with_mission_sizes([2, 3, 7, 3, 4]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissionSize { mission: 3, size: 7, max: 6 })
        );

        let config = GameConfig::new().with_mission_sizes([0, 3, 4, 3, 4]);
        assert!(matches!(config.validate(), Err(ConfigError::MissionSize { mission: 1, .. })));
    }

    #[test]
    fn test_validate_bounds_sizes_by_agent_count() {
        let config = GameConfig::new();
        let full = config.agent_count();
        assert!(config.clone().with_mission_sizes([full; 5]).validate().is_ok());
        assert_eq!(
            config.with_mission_sizes([full + 1; 5]).validate(),
            Err(ConfigError::MissionSize { mission: 1, size: full + 1, max: full })
        );
    }

    #[test]
    fn test_validate_rejects_bad_counters() {
        assert_eq!(
            GameConfig::new().with_max_rejections(0).validate(),
            Err(ConfigError::MaxRejections)
        );
        assert_eq!(
            GameConfig::new().with_missions_to_win(4).validate(),
            Err(ConfigError::MissionsToWin(4))
        );
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new().with_max_rejections(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
