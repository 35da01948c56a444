use ms_core::{AgentId, LinkId};
use ms_events::EventError;
use thiserror::Error;

/// Errors raised while rebuilding trips.  All of them mean the event stream
/// broke its contract; reconstruction cannot continue past them.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("{kind} event for agent {agent} at t={time} but the agent has no open trip")]
    NoOpenTrip {
        agent: AgentId,
        kind:  &'static str,
        time:  f64,
    },

    #[error("agent {agent} reached {act_type:?} at t={time} without departing; the trip has no mode")]
    NoDeparture {
        agent:    AgentId,
        act_type: String,
        time:     f64,
    },

    #[error("cannot locate {act_type:?} activity of agent {agent}: no coordinate and link {link:?} is not in the network")]
    Unlocatable {
        agent:    AgentId,
        act_type: String,
        link:     Option<LinkId>,
    },

    #[error("event stream error: {0}")]
    Event(#[from] EventError),
}

pub type TripResult<T> = Result<T, TripError>;
