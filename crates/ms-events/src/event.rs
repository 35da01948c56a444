//! The event kinds the analyses understand.

use ms_core::{AgentId, Coord, LinkId, TransportMode};

/// Suffix the simulation appends to synthetic mode-transfer activities
/// (`"car interaction"`, `"pt interaction"`, …).
pub const INTERACTION_SUFFIX: &str = " interaction";

/// `true` for synthetic mode-transfer activities, which are never a trip's
/// origin or destination.
#[inline]
pub fn is_interaction(act_type: &str) -> bool {
    act_type.ends_with(INTERACTION_SUFFIX)
}

/// Payload shared by activity start and end events.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEvent {
    pub agent:    AgentId,
    pub time:     f64,
    pub act_type: String,
    /// Explicit activity location.  When absent, the location is the
    /// representative coordinate of `link`.
    pub coord:    Option<Coord>,
    pub link:     Option<LinkId>,
}

impl ActivityEvent {
    #[inline]
    pub fn is_interaction(&self) -> bool {
        is_interaction(&self.act_type)
    }
}

/// One simulation event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// An agent leaves an activity.
    ActivityEnd(ActivityEvent),

    /// An agent arrives at an activity.
    ActivityStart(ActivityEvent),

    /// An agent starts a leg.
    Departure {
        agent:    AgentId,
        time:     f64,
        leg_mode: TransportMode,
    },

    /// A transit vehicle driver starts its service.  The driver is not a
    /// traveller and never makes trips.
    TransitOperatorStart {
        agent: AgentId,
        time:  f64,
    },

    /// A vehicle leaves a network link.
    LinkLeave {
        link: LinkId,
        time: f64,
    },

    /// Any event kind the analyses do not interpret.
    Other {
        time: f64,
        kind: String,
    },
}

impl Event {
    pub fn time(&self) -> f64 {
        match self {
            Event::ActivityEnd(a) | Event::ActivityStart(a) => a.time,
            Event::Departure { time, .. }
            | Event::TransitOperatorStart { time, .. }
            | Event::LinkLeave { time, .. }
            | Event::Other { time, .. } => *time,
        }
    }

    /// The agent the event concerns; `None` for vehicle events and
    /// uninterpreted kinds.
    pub fn agent(&self) -> Option<&AgentId> {
        match self {
            Event::ActivityEnd(a) | Event::ActivityStart(a) => Some(&a.agent),
            Event::Departure { agent, .. } | Event::TransitOperatorStart { agent, .. } => Some(agent),
            Event::LinkLeave { .. } | Event::Other { .. } => None,
        }
    }

    /// The event-file `type` value for this event.
    pub fn kind(&self) -> &str {
        match self {
            Event::ActivityEnd(_)               => "actend",
            Event::ActivityStart(_)             => "actstart",
            Event::Departure { .. }             => "departure",
            Event::TransitOperatorStart { .. }  => "TransitDriverStarts",
            Event::LinkLeave { .. }             => "left link",
            Event::Other { kind, .. }           => kind,
        }
    }
}
