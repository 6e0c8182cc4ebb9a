//! Self-play loop for generating training data.
//!
//! Drives complete games with a [`Policy`] controlling every agent and
//! collects a [`GameRecord`] and a [`Trajectory`] per game.

use tracing::info;

use crate::core::{AvalonError, GameConfig, GameRng, Result};
use crate::games::avalon::AvalonEnv;
use crate::nn::{ObservationEncoder, Policy};
use crate::rules::AgentEnvironment;

use super::record::GameRecord;
use super::trajectory::{Step, Trajectory};

/// Configuration for self-play.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Maximum turns per game. A game still running after this many turns
    /// is reported as [`AvalonError::StepLimitExceeded`].
    pub max_steps: usize,

    /// Seed offset (combined with game index for unique seeds).
    pub seed_offset: u64,

    /// Keep an encoded observation for every turn.
    pub record_steps: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_steps: 2000,
            seed_offset: 0,
            record_steps: true,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_record_steps(mut self, record: bool) -> Self {
        self.record_steps = record;
        self
    }
}

/// Worker for running self-play games.
pub struct SelfPlayWorker<P: Policy> {
    game: GameConfig,
    policy: P,
    encoder: ObservationEncoder,
    config: SelfPlayConfig,
}

impl<P: Policy> SelfPlayWorker<P> {
    /// Fails if `game` is not a playable configuration.
    pub fn new(game: GameConfig, policy: P, config: SelfPlayConfig) -> Result<Self> {
        game.validate()?;
        Ok(Self {
            game,
            policy,
            encoder: ObservationEncoder::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game from `seed`.
    ///
    /// The same seed always produces the same game for a deterministic
    /// policy: seating comes from `seed` and the policy draws from a
    /// generator forked off it.
    pub fn play_game(&mut self, game_id: u64, seed: u64) -> Result<(GameRecord, Trajectory)> {
        let mut env = AvalonEnv::new(self.game.clone(), seed)?;
        env.reset(Some(seed));
        let mut rng = GameRng::new(seed).fork();
        let mut trajectory = Trajectory::new(seed);

        while !env.is_done() {
            if env.step_count() as usize >= self.config.max_steps {
                return Err(AvalonError::StepLimitExceeded {
                    seed,
                    limit: self.config.max_steps,
                });
            }

            let last = env.last();
            let action = self.policy.act(last.agent, &last.view, &mut rng);
            let encoded = self
                .config
                .record_steps
                .then(|| self.encoder.encode_view(&last.view));
            let step_number = env.step_count();

            env.step(action.clone());

            if let Some(encoded_state) = encoded {
                let accepted = env
                    .action_log()
                    .last()
                    .is_some_and(|record| record.accepted);
                trajectory.push(Step::new(encoded_state, action, last.agent, step_number, accepted));
            }
        }

        trajectory.game_length = env.step_count();
        trajectory.set_outcome(env.rewards().clone());
        let record = GameRecord::from_env(game_id, &env)?;

        info!(
            game_id,
            seed,
            winner = %record.winner,
            condition = record.win_condition.tag(),
            turns = record.turn_count,
            "self-play game finished"
        );
        Ok((record, trajectory))
    }

    /// Play `count` games with seeds `seed_offset + i`.
    pub fn play_games(&mut self, count: usize) -> Result<Vec<(GameRecord, Trajectory)>> {
        let offset = self.config.seed_offset;
        (0..count as u64)
            .map(|i| self.play_game(i, offset.wrapping_add(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AgentId, Faction};
    use crate::nn::RandomPolicy;

    fn worker(config: SelfPlayConfig) -> SelfPlayWorker<RandomPolicy> {
        SelfPlayWorker::new(GameConfig::default(), RandomPolicy::default(), config).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = SelfPlayConfig::new()
            .with_max_steps(50)
            .with_seed_offset(1000)
            .with_record_steps(false);

        assert_eq!(config.max_steps, 50);
        assert_eq!(config.seed_offset, 1000);
        assert!(!config.record_steps);
    }

    #[test]
    fn test_random_game_finishes() {
        let mut worker = worker(SelfPlayConfig::default());
        let (record, trajectory) = worker.play_game(0, 42).unwrap();

        assert_eq!(trajectory.len() as u32, record.turn_count);
        assert_eq!(trajectory.game_length, record.turn_count);
        let good = trajectory.agent_outcome(AgentId::new(0));
        let expected = if record.winner == Faction::Good { 1.0 } else { -1.0 };
        assert_eq!(good, expected);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut worker = worker(SelfPlayConfig::default());
        let (a, _) = worker.play_game(0, 7).unwrap();
        let (b, _) = worker.play_game(0, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_limit() {
        let mut worker = worker(SelfPlayConfig::default().with_max_steps(3));
        assert!(matches!(
            worker.play_game(0, 1),
            Err(AvalonError::StepLimitExceeded { seed: 1, limit: 3 })
        ));
    }

    #[test]
    fn test_play_games_without_steps() {
        let mut worker = worker(SelfPlayConfig::default().with_record_steps(false).with_seed_offset(100));
        let games = worker.play_games(3).unwrap();

        assert_eq!(games.len(), 3);
        for (i, (record, trajectory)) in games.iter().enumerate() {
            assert_eq!(record.seed, 100 + i as u64);
            assert!(trajectory.is_empty());
            assert!(trajectory.game_length > 0);
        }
    }
}
