//! `TripReconstructor` — turns the event stream into per-agent trips.
//!
//! # Transitions
//!
//! | Event                          | Effect                                             |
//! |--------------------------------|----------------------------------------------------|
//! | `TransitOperatorStart`         | agent marked as operator; all its events ignored   |
//! | `ActivityEnd` (real activity)  | new open trip starting at the activity's location  |
//! | `Departure`                    | leg mode folded into the open trip's main mode     |
//! | `ActivityStart` (real)         | open trip closed at the activity's location        |
//! | interaction activity           | ignored                                            |
//! | `LinkLeave`, `Other`           | ignored                                            |
//!
//! A departure or real activity start for an agent without an open trip is a
//! broken stream and aborts reconstruction, as is a real activity start that
//! closes a trip no departure ever gave a mode.

use std::fmt;

use ms_core::Coord;
use ms_events::{ActivityEvent, Event, EventHandler};
use ms_spatial::NetworkLookup;

use crate::{TripError, TripRecord, TripResult, TripStore};

// ── ReconstructionStats ───────────────────────────────────────────────────────

/// Counters collected while processing a stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructionStats {
    pub events:               u64,
    pub transit_operators:    u64,
    pub operator_events:      u64,
    pub interaction_events:   u64,
    pub trips_opened:         u64,
    pub trips_closed:         u64,
    pub legs:                 u64,
}

impl ReconstructionStats {
    /// Trips still open, normally those cut off by the end of the simulation.
    pub fn trips_open(&self) -> u64 {
        self.trips_opened - self.trips_closed
    }
}

impl fmt::Display for ReconstructionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} trips ({} open), {} legs, {} transit operators \
             ({} events skipped), {} interaction activities skipped",
            self.events,
            self.trips_opened,
            self.trips_open(),
            self.legs,
            self.transit_operators,
            self.operator_events,
            self.interaction_events,
        )
    }
}

// ── TripReconstructor ─────────────────────────────────────────────────────────

/// Event handler that rebuilds every agent's trips.
///
/// Generic over the network lookup; the analyzer passes a shared
/// `Arc<Network>`.
pub struct TripReconstructor<N: NetworkLookup> {
    network: N,
    store:   TripStore,
    stats:   ReconstructionStats,
}

impl<N: NetworkLookup> TripReconstructor<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            store: TripStore::new(),
            stats: ReconstructionStats::default(),
        }
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// - [`TripError::NoOpenTrip`] for a departure or real activity start
    ///   when the agent has no open trip.
    /// - [`TripError::NoDeparture`] for a real activity start that would
    ///   close a trip without any departure.
    /// - [`TripError::Unlocatable`] when an activity has no coordinate and
    ///   its link is unknown to the network.
    pub fn process(&mut self, event: &Event) -> TripResult<()> {
        self.stats.events += 1;

        match event {
            Event::TransitOperatorStart { agent, .. } => {
                let entry = self.store.entry(agent);
                if !entry.is_transit_operator {
                    entry.is_transit_operator = true;
                    self.stats.transit_operators += 1;
                }
            }

            Event::ActivityEnd(activity) => {
                if self.skip_activity(activity) {
                    return Ok(());
                }
                let start = locate(&self.network, activity)?;
                self.store.entry(&activity.agent).trips.push(TripRecord::open(start));
                self.stats.trips_opened += 1;
            }

            Event::Departure { agent, time, leg_mode } => {
                if self.store.is_transit_operator(agent) {
                    self.stats.operator_events += 1;
                    return Ok(());
                }
                let trip = self
                    .store
                    .get_mut(agent)
                    .and_then(|a| a.open_trip_mut())
                    .ok_or_else(|| TripError::NoOpenTrip {
                        agent: agent.clone(),
                        kind:  "departure",
                        time:  *time,
                    })?;
                trip.add_leg(leg_mode);
                self.stats.legs += 1;
            }

            Event::ActivityStart(activity) => {
                if self.skip_activity(activity) {
                    return Ok(());
                }
                let trip = self
                    .store
                    .get_mut(&activity.agent)
                    .and_then(|a| a.open_trip_mut())
                    .ok_or_else(|| TripError::NoOpenTrip {
                        agent: activity.agent.clone(),
                        kind:  "activity start",
                        time:  activity.time,
                    })?;
                if trip.mode().is_none() {
                    return Err(TripError::NoDeparture {
                        agent:    activity.agent.clone(),
                        act_type: activity.act_type.clone(),
                        time:     activity.time,
                    });
                }
                trip.close(locate(&self.network, activity)?);
                self.stats.trips_closed += 1;
            }

            Event::LinkLeave { .. } | Event::Other { .. } => {}
        }
        Ok(())
    }

    /// `true` for activities that never open or close a trip, counting them.
    fn skip_activity(&mut self, activity: &ActivityEvent) -> bool {
        if self.store.is_transit_operator(&activity.agent) {
            self.stats.operator_events += 1;
            true
        } else if activity.is_interaction() {
            self.stats.interaction_events += 1;
            true
        } else {
            false
        }
    }

    pub fn store(&self) -> &TripStore {
        &self.store
    }

    pub fn stats(&self) -> &ReconstructionStats {
        &self.stats
    }

    /// Consume the reconstructor, keeping only the trips.
    pub fn into_store(self) -> TripStore {
        self.store
    }
}

/// The activity's own coordinate, else its link's coordinate.
fn locate<N: NetworkLookup>(network: &N, activity: &ActivityEvent) -> TripResult<Coord> {
    activity
        .coord
        .or_else(|| activity.link.as_ref().and_then(|l| network.link_coord(l)))
        .ok_or_else(|| TripError::Unlocatable {
            agent:    activity.agent.clone(),
            act_type: activity.act_type.clone(),
            link:     activity.link.clone(),
        })
}

// ── EventHandler ──────────────────────────────────────────────────────────────

impl<N: NetworkLookup> EventHandler for TripReconstructor<N> {
    type Error = TripError;

    fn handle_event(&mut self, event: &Event) -> TripResult<()> {
        self.process(event)
    }

    fn on_stream_end(&mut self) -> TripResult<()> {
        log::debug!("trip reconstruction: {}", self.stats);
        Ok(())
    }
}
