//! Trip records and per-agent trip sequences.

use ms_core::{Coord, DistanceClass, TransportMode};

/// One door-to-door trip between two real activities.
///
/// A trip is **open** from the activity end that starts it until the next
/// real activity start, and may only change while open: each departure in
/// between folds its leg mode into [`mode`](Self::mode), and the activity
/// start sets [`end`](Self::end).  Once closed it is never touched again.
///
/// A closed trip always has a mode: reconstruction refuses to close a trip
/// that saw no departure.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start: Coord,
    end:   Option<Coord>,
    mode:  Option<TransportMode>,
}

impl TripRecord {
    /// A trip that has just started at `start`.
    #[inline]
    pub fn open(start: Coord) -> Self {
        Self { start, end: None, mode: None }
    }

    /// A finished trip.  Used by callers that build trip sets directly.
    pub fn completed(start: Coord, end: Coord, mode: TransportMode) -> Self {
        Self { start, end: Some(end), mode: Some(mode) }
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// `None` while the trip is still open.
    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Main mode; `None` until the first departure.
    #[inline]
    pub fn mode(&self) -> Option<&TransportMode> {
        self.mode.as_ref()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Straight-line distance between the endpoints; `None` while open.
    pub fn distance_m(&self) -> Option<f64> {
        self.end.map(|end| self.start.distance_m(end))
    }

    pub fn distance_class(&self) -> Option<DistanceClass> {
        self.distance_m().map(DistanceClass::classify)
    }

    pub(crate) fn add_leg(&mut self, leg_mode: &TransportMode) {
        debug_assert!(self.is_open(), "legs are only added to open trips");
        self.mode = Some(TransportMode::resolve(self.mode.take(), leg_mode.clone()));
    }

    pub(crate) fn close(&mut self, end: Coord) {
        debug_assert!(self.is_open(), "a trip is closed once");
        self.end = Some(end);
    }
}

/// Everything trip reconstruction knows about one agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentTrips {
    /// Set by the first transit-operator event; never cleared.
    pub(crate) is_transit_operator: bool,

    /// Append-only, in stream order.
    pub(crate) trips: Vec<TripRecord>,
}

impl AgentTrips {
    #[inline]
    pub fn is_transit_operator(&self) -> bool {
        self.is_transit_operator
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    /// The agent's current open trip: the last trip, if it has no end yet.
    pub fn open_trip(&self) -> Option<&TripRecord> {
        self.trips.last().filter(|t| t.is_open())
    }

    pub(crate) fn open_trip_mut(&mut self) -> Option<&mut TripRecord> {
        self.trips.last_mut().filter(|t| t.is_open())
    }

    /// Closed trips, in the order they were made.
    pub fn completed_trips(&self) -> impl Iterator<Item = &TripRecord> {
        self.trips.iter().filter(|t| !t.is_open())
    }
}
