//! The six-agent environment.

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace};

use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, AgentId, AgentMap, ConfigError, GameConfig,
    GameRng, GameState, Outcome, RejectionKind, Result, TurnScheduler,
};
use crate::nn::View;
use crate::rules::AgentEnvironment;

use super::phases::{self, MissionSummary};
use super::setup;

/// Per-agent metadata written by the last step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    /// Set for every agent on the step a mission resolves.
    pub mission: Option<MissionSummary>,
    /// Why the acting agent's action was ignored, if it was.
    pub rejection: Option<ActionError>,
}

/// Counters for ignored input. Observing them never changes the game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub accepted: u64,
    pub ignored: u64,
    /// Steps taken by an agent that had already terminated.
    pub dead_steps: u64,
    pub by_kind: FxHashMap<RejectionKind, u64>,
    pub last_error: Option<ActionError>,
}

impl Diagnostics {
    /// Ignored actions of one category.
    #[must_use]
    pub fn count(&self, kind: RejectionKind) -> u64 {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, error: ActionError) {
        self.ignored += 1;
        if error.category() == RejectionKind::PostTermination {
            self.dead_steps += 1;
        }
        *self.by_kind.entry(error.category()).or_insert(0) += 1;
        self.last_error = Some(error);
    }
}

/// Hidden-role mission game for six agents.
///
/// Agents act one at a time in seating order. Every call to
/// [`step`](AgentEnvironment::step) consumes exactly one turn, whether or not
/// the action was accepted.
///
/// ## Example
///
/// ```
/// use avalon_env::games::avalon::AvalonEnv;
/// use avalon_env::nn::{Policy, RandomPolicy};
/// use avalon_env::rules::AgentEnvironment;
/// use avalon_env::core::GameRng;
///
/// let mut env = AvalonEnv::from_seed(7);
/// let mut policy = RandomPolicy::default();
/// let mut rng = GameRng::new(7);
///
/// while !env.is_done() {
///     let last = env.last();
///     let action = policy.act(last.agent, &last.view, &mut rng);
///     env.step(action);
/// }
/// assert!(env.outcome().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct AvalonEnv {
    config: GameConfig,
    rng: GameRng,
    seed: u64,
    state: GameState,
    scheduler: TurnScheduler,
    rewards: AgentMap<f32>,
    terminations: AgentMap<bool>,
    truncations: AgentMap<bool>,
    infos: AgentMap<StepInfo>,
    diagnostics: Diagnostics,
    action_log: Vec<ActionRecord>,
    steps: u32,
}

impl AvalonEnv {
    /// Validate `config` and start the first game from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, seed))
    }

    /// Standard six-agent rules.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::start(GameConfig::default(), seed)
    }

    fn start(config: GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let seating = setup::shuffled_seating(&mut rng);
        let state = GameState::new(seating.clone());

        let mut env = Self {
            config,
            rng,
            seed,
            state,
            scheduler: TurnScheduler::new(seating),
            rewards: AgentMap::with_default(),
            terminations: AgentMap::with_default(),
            truncations: AgentMap::with_default(),
            infos: AgentMap::with_default(),
            diagnostics: Diagnostics::default(),
            action_log: Vec::new(),
            steps: 0,
        };
        env.log_start();
        env
    }

    /// Start a new game with a fixed seating order instead of a shuffled one.
    pub fn reset_with_seating(&mut self, seating: &[AgentId]) -> std::result::Result<View, ConfigError> {
        let state = setup::deal(seating)?;
        self.install(state);
        Ok(self.observe(self.current_agent()))
    }

    fn install(&mut self, state: GameState) {
        self.scheduler.reset(state.seating().to_vec());
        self.state = state;
        self.rewards.fill(0.0);
        self.terminations.fill(false);
        self.truncations.fill(false);
        self.infos.fill(StepInfo::default());
        self.diagnostics = Diagnostics::default();
        self.action_log.clear();
        self.steps = 0;
        self.log_start();
    }

    fn log_start(&self) {
        debug!(
            seed = self.seed,
            seating = ?self.state.seating(),
            leader = %self.state.leader(),
            "game started"
        );
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the game in progress.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Full game state. Not agent-safe: drivers and records only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome()
    }

    /// Checked [`observe`](AgentEnvironment::observe). `None` if `agent` is
    /// not on the roster.
    #[must_use]
    pub fn try_observe(&self, agent: AgentId) -> Option<View> {
        View::build(&self.state, agent)
    }

    /// Action kind `agent` may submit now, `None` if anything would be ignored.
    #[must_use]
    pub fn expected_action(&self, agent: AgentId) -> Option<ActionKind> {
        phases::expected_action(&self.state, agent)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Every submitted action since reset, accepted or not.
    #[must_use]
    pub fn action_log(&self) -> &[ActionRecord] {
        &self.action_log
    }

    /// Turns consumed since reset.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.steps
    }

    /// Consume the current turn for input that could not be decoded into
    /// an [`Action`]. Counts as an ignored action; not written to the log.
    pub fn step_malformed(&mut self, reason: impl Into<String>) {
        let agent = self.scheduler.current();
        self.infos.fill(StepInfo::default());
        self.reject(agent, ActionError::Malformed { reason: reason.into() });
        self.steps += 1;
        self.scheduler.next();
    }

    fn reject(&mut self, agent: AgentId, error: ActionError) {
        debug!(step = self.steps, agent = %agent, %error, "action ignored");
        self.diagnostics.record(error.clone());
        self.infos[agent].rejection = Some(error);
    }

    fn finish(&mut self, outcome: &Outcome) {
        let rewards = phases::terminal_rewards(outcome);
        for (agent, reward) in rewards.iter() {
            self.rewards[agent] += reward;
        }
        self.terminations.fill(true);

        info!(
            seed = self.seed,
            winner = %outcome.winner,
            condition = outcome.condition.tag(),
            steps = self.steps + 1,
            "game over"
        );
    }
}

impl AgentEnvironment for AvalonEnv {
    type Observation = View;
    type Action = Action;
    type Info = StepInfo;

    fn reset(&mut self, seed: Option<u64>) -> View {
        let seed = seed.unwrap_or_else(|| self.rng.fork().seed());
        self.seed = seed;
        let seating = setup::shuffled_seating(&mut GameRng::new(seed));
        self.install(GameState::new(seating));
        self.observe(self.current_agent())
    }

    fn step(&mut self, action: Action) {
        let agent = self.scheduler.current();
        self.infos.fill(StepInfo::default());

        let result = if self.terminations[agent] || self.truncations[agent] {
            Err(ActionError::PostTermination { agent })
        } else {
            phases::apply(&self.config, &mut self.state, agent, action.clone())
        };

        let accepted = match result {
            Ok(transition) => {
                self.diagnostics.accepted += 1;
                trace!(step = self.steps, agent = %agent, kind = %action.kind(), "action accepted");

                if transition.changed_phase() {
                    debug!(from = %transition.from, to = %transition.to, "phase changed");
                }
                if let Some(summary) = transition.mission {
                    for info in self.infos.values_mut() {
                        info.mission = Some(summary);
                    }
                }
                if let Some(outcome) = transition.outcome {
                    self.finish(&outcome);
                }
                true
            }
            Err(error) => {
                self.reject(agent, error);
                false
            }
        };

        self.action_log
            .push(ActionRecord::new(agent, action, self.steps, accepted));
        self.steps += 1;
        self.scheduler.next();
    }

    /// # Panics
    ///
    /// Panics if `agent` is not on the roster.
    fn observe(&self, agent: AgentId) -> View {
        self.try_observe(agent)
            .unwrap_or_else(|| panic!("{agent} is not seated in this game"))
    }

    fn current_agent(&self) -> AgentId {
        self.scheduler.current()
    }

    fn rewards(&self) -> &AgentMap<f32> {
        &self.rewards
    }

    fn clear_rewards(&mut self) {
        self.rewards.fill(0.0);
    }

    fn terminations(&self) -> &AgentMap<bool> {
        &self.terminations
    }

    fn truncations(&self) -> &AgentMap<bool> {
        &self.truncations
    }

    fn infos(&self) -> &AgentMap<StepInfo> {
        &self.infos
    }
}
