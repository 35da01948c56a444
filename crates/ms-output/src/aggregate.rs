//! `TripAggregate` — eligible-trip counts by mode and distance class.
//!
//! A trip is **eligible** when its agent passes the [`AgentFilter`] and it
//! has been closed (both endpoints known).  Closed trips always carry a mode,
//! so the same set of trips feeds both reports.

use std::collections::BTreeMap;

use ms_core::{DistanceClass, TransportMode};
use ms_trips::{AgentTrips, TripRecord, TripStore};

use crate::{AgentFilter, ModalDistanceShareRow, ModalShareRow};

const CLASSES: usize = DistanceClass::ALL.len();

/// Counts over the eligible trips of a [`TripStore`].
///
/// Maps are keyed by `TransportMode`, whose ordering is the report order
/// (car, ride, pt, bike, walk, then unknown modes by name), so iterating
/// them yields rows in output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripAggregate {
    eligible:     u64,
    participants: u64,
    by_mode:      BTreeMap<TransportMode, u64>,
    by_cell:      BTreeMap<TransportMode, [u64; CLASSES]>,
    by_class:     [u64; CLASSES],
}

impl TripAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate every agent of `store` accepted by `filter`.
    ///
    /// With the `parallel` feature agents are folded on Rayon's pool and
    /// the partial aggregates merged; counts are integers, so the result
    /// does not depend on scheduling.
    pub fn from_store<F: AgentFilter + ?Sized>(store: &TripStore, filter: &F) -> Self {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            store
                .agents()
                .par_iter()
                .filter(|(agent, _)| filter.accepts(agent))
                .fold(Self::new, |mut acc, (_, trips)| {
                    acc.add_agent(trips);
                    acc
                })
                .reduce(Self::new, |mut a, b| {
                    a.merge(b);
                    a
                })
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut acc = Self::new();
            for (_, trips) in store.iter().filter(|(agent, _)| filter.accepts(agent)) {
                acc.add_agent(trips);
            }
            acc
        }
    }

    /// Add one accepted agent's eligible trips.
    pub fn add_agent(&mut self, agent: &AgentTrips) {
        if agent.is_transit_operator() {
            return;
        }
        let mut any = false;
        for trip in agent.trips() {
            any |= self.add_trip(trip);
        }
        if any {
            self.participants += 1;
        }
    }

    /// Count `trip` if it is eligible.  Returns whether it was.
    pub fn add_trip(&mut self, trip: &TripRecord) -> bool {
        let (Some(class), Some(mode)) = (trip.distance_class(), trip.mode()) else {
            return false;
        };
        self.eligible += 1;
        *self.by_mode.entry(mode.clone()).or_default() += 1;
        self.by_cell.entry(mode.clone()).or_default()[class.index()] += 1;
        self.by_class[class.index()] += 1;
        true
    }

    /// Fold `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        self.eligible += other.eligible;
        self.participants += other.participants;
        for (mode, n) in other.by_mode {
            *self.by_mode.entry(mode).or_default() += n;
        }
        for (mode, cells) in other.by_cell {
            let mine = self.by_cell.entry(mode).or_default();
            for (m, o) in mine.iter_mut().zip(cells) {
                *m += o;
            }
        }
        for (m, o) in self.by_class.iter_mut().zip(other.by_class) {
            *m += o;
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn eligible_trips(&self) -> u64 {
        self.eligible
    }

    /// Accepted agents with at least one eligible trip.
    pub fn participants(&self) -> u64 {
        self.participants
    }

    pub fn mode_count(&self, mode: &TransportMode) -> u64 {
        self.by_mode.get(mode).copied().unwrap_or(0)
    }

    /// Eligible trips of every mode in `class`.
    pub fn class_total(&self, class: DistanceClass) -> u64 {
        self.by_class[class.index()]
    }

    pub fn cell(&self, mode: &TransportMode, class: DistanceClass) -> u64 {
        self.by_cell.get(mode).map_or(0, |cells| cells[class.index()])
    }

    /// Observed modes with their counts, in report order.
    pub fn modes(&self) -> impl Iterator<Item = (&TransportMode, u64)> {
        self.by_mode.iter().map(|(m, n)| (m, *n))
    }

    // ── Report rows ───────────────────────────────────────────────────────

    /// One row per observed mode.
    pub fn modal_share_rows(&self) -> Vec<ModalShareRow> {
        self.modes()
            .map(|(mode, count)| ModalShareRow {
                mode:  mode.clone(),
                count,
                share: ratio(count, self.eligible),
            })
            .collect()
    }

    /// Every (mode, class) combination over the reported modes, mode-major,
    /// zero cells included.
    pub fn modal_distance_share_rows(&self) -> Vec<ModalDistanceShareRow> {
        let mut rows = Vec::with_capacity(TransportMode::REPORTED.len() * CLASSES);
        for mode in TransportMode::REPORTED {
            for class in DistanceClass::ALL {
                let value = self.cell(&mode, class);
                rows.push(ModalDistanceShareRow {
                    distance: class,
                    mode: mode.clone(),
                    value,
                    share_of_distance: ratio(value, self.class_total(class)),
                });
            }
        }
        rows
    }
}

/// `part / whole`, with an empty whole giving `0`.
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}
