//! Agent identity, roles and factions.
//!
//! ## Roster
//!
//! The game always seats the same six roles. An agent's name *is* its role,
//! so `AgentId(i)` is simply the index of the role in [`Role::ROSTER`]:
//!
//! | index | role             | faction |
//! |-------|------------------|---------|
//! | 0     | `Merlin`         | Good    |
//! | 1     | `Morgana`        | Evil    |
//! | 2     | `Percival`       | Good    |
//! | 3     | `Assassin`       | Evil    |
//! | 4     | `Generic_Good_1` | Good    |
//! | 5     | `Generic_Good_2` | Good    |
//!
//! Seating (turn order) is shuffled per game; the roster never is.
//!
//! ## AgentMap
//!
//! Per-agent data storage backed by a `Vec` for O(1) access, indexed by
//! `AgentId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of agents seated in every game.
pub const AGENT_COUNT: usize = 6;

/// The two teams. Fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Good,
    Evil,
}

impl Faction {
    /// The other faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Faction::Good => Faction::Evil,
            Faction::Evil => Faction::Good,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Good => write!(f, "good"),
            Faction::Evil => write!(f, "evil"),
        }
    }
}

/// A seat-independent role. Discriminants are roster indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Merlin = 0,
    Morgana = 1,
    Percival = 2,
    Assassin = 3,
    GenericGood1 = 4,
    GenericGood2 = 5,
}

impl Role {
    /// The fixed roster, in roster-index order.
    pub const ROSTER: [Role; AGENT_COUNT] = [
        Role::Merlin,
        Role::Morgana,
        Role::Percival,
        Role::Assassin,
        Role::GenericGood1,
        Role::GenericGood2,
    ];

    /// Look up the role held by an agent. `None` if the id is off-roster.
    #[must_use]
    pub fn of(agent: AgentId) -> Option<Role> {
        Self::ROSTER.get(agent.index()).copied()
    }

    /// Look up a role by its roster name (`"Generic_Good_1"` etc.).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Role> {
        Self::ROSTER.iter().copied().find(|r| r.name() == name)
    }

    /// The agent holding this role.
    #[must_use]
    pub const fn agent(self) -> AgentId {
        AgentId(self as u8)
    }

    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Role::Morgana | Role::Assassin => Faction::Evil,
            Role::Merlin | Role::Percival | Role::GenericGood1 | Role::GenericGood2 => Faction::Good,
        }
    }

    #[must_use]
    pub const fn is_evil(self) -> bool {
        matches!(self.faction(), Faction::Evil)
    }

    /// Roster name, which doubles as the agent name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Merlin => "Merlin",
            Role::Morgana => "Morgana",
            Role::Percival => "Percival",
            Role::Assassin => "Assassin",
            Role::GenericGood1 => "Generic_Good_1",
            Role::GenericGood2 => "Generic_Good_2",
        }
    }

    /// All roles belonging to `faction`, in roster order.
    pub fn members(faction: Faction) -> impl Iterator<Item = Role> {
        Self::ROSTER.into_iter().filter(move |r| r.faction() == faction)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Agent identifier: an index into [`Role::ROSTER`].
///
/// Ids arriving from outside the engine (actions) are not validated on
/// construction; use [`AgentId::is_valid`] or [`Role::of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u8);

impl AgentId {
    /// Create a new agent ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Does this id refer to a seated agent?
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index() < AGENT_COUNT
    }

    /// Role of this agent, `None` if off-roster.
    #[must_use]
    pub fn role(self) -> Option<Role> {
        Role::of(self)
    }

    /// Faction of this agent, `None` if off-roster.
    #[must_use]
    pub fn faction(self) -> Option<Faction> {
        self.role().map(Role::faction)
    }

    /// Iterate over every agent in roster order.
    ///
    /// ```
    /// use avalon_env::core::AgentId;
    ///
    /// let agents: Vec<_> = AgentId::all().collect();
    /// assert_eq!(agents.len(), 6);
    /// assert_eq!(agents[0], AgentId::new(0));
    /// ```
    pub fn all() -> impl Iterator<Item = AgentId> {
        (0..AGENT_COUNT as u8).map(AgentId)
    }
}

impl From<Role> for AgentId {
    fn from(role: Role) -> Self {
        role.agent()
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role() {
            Some(role) => f.write_str(role.name()),
            None => write!(f, "Agent({})", self.0),
        }
    }
}

/// Per-agent data storage with O(1) access.
///
/// ```
/// use avalon_env::core::{AgentId, AgentMap, Role};
///
/// let mut rewards: AgentMap<f32> = AgentMap::with_value(0.0);
/// rewards[Role::Assassin.agent()] += 1.0;
/// assert_eq!(rewards[AgentId::new(3)], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentMap<T> {
    data: Vec<T>,
}

impl<T> AgentMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(AgentId) -> T) -> Self {
        Self {
            data: AgentId::all().map(factory).collect(),
        }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get an entry, `None` for off-roster ids.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> Option<&T> {
        self.data.get(agent.index())
    }

    /// Get a mutable entry, `None` for off-roster ids.
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut T> {
        self.data.get_mut(agent.index())
    }

    /// Overwrite every entry with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Iterate over (AgentId, &T) pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (AgentId(i as u8), v))
    }

    /// Iterate over (AgentId, &mut T) pairs in roster order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (AgentId(i as u8), v))
    }

    /// Iterate over values in roster order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<AgentId> for AgentMap<T> {
    type Output = T;

    fn index(&self, agent: AgentId) -> &Self::Output {
        &self.data[agent.index()]
    }
}

impl<T> IndexMut<AgentId> for AgentMap<T> {
    fn index_mut(&mut self, agent: AgentId) -> &mut Self::Output {
        &mut self.data[agent.index()]
    }
}
