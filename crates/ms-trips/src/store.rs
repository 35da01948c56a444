//! The `TripStore` — every agent's trip sequence, keyed by agent id.

use ms_core::AgentId;

use crate::{AgentTrips, TripRecord};

/// Map keyed by agent id.  FxHash under the `fx-hash` feature, SipHash
/// otherwise.
#[cfg(feature = "fx-hash")]
pub type AgentMap<V> = rustc_hash::FxHashMap<AgentId, V>;

#[cfg(not(feature = "fx-hash"))]
pub type AgentMap<V> = std::collections::HashMap<AgentId, V>;

/// Trip sequences for every agent seen in the event stream.
///
/// Agents get an entry lazily, on their first relevant event.  Entries are
/// never removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TripStore {
    agents: AgentMap<AgentTrips>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The agent's entry, created empty on first access.
    pub(crate) fn entry(&mut self, agent: &AgentId) -> &mut AgentTrips {
        // Ids are `Arc<str>`, so the clone is a refcount bump.
        self.agents.entry(agent.clone()).or_default()
    }

    pub(crate) fn get_mut(&mut self, agent: &AgentId) -> Option<&mut AgentTrips> {
        self.agents.get_mut(agent)
    }

    pub fn get(&self, agent: &AgentId) -> Option<&AgentTrips> {
        self.agents.get(agent)
    }

    /// `true` once the agent has been marked as a transit operator.
    pub fn is_transit_operator(&self, agent: &AgentId) -> bool {
        self.agents.get(agent).is_some_and(AgentTrips::is_transit_operator)
    }

    /// Iterate every agent with its trips, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &AgentTrips)> {
        self.agents.iter()
    }

    /// The underlying map, for callers that need parallel iteration.
    pub fn agents(&self) -> &AgentMap<AgentTrips> {
        &self.agents
    }

    /// Number of agents with an entry (transit operators included).
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Total trips across all agents, open ones included.
    pub fn trip_count(&self) -> usize {
        self.agents.values().map(|a| a.trips.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Build a store directly from finished trip lists.
impl FromIterator<(AgentId, Vec<TripRecord>)> for TripStore {
    fn from_iter<I: IntoIterator<Item = (AgentId, Vec<TripRecord>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (agent, trips) in iter {
            store.entry(&agent).trips.extend(trips);
        }
        store
    }
}
