//! Population reference locations and the home-in-region agent filter.
//!
//! # CSV format
//!
//! One row per planned activity, in plan order:
//!
//! ```csv
//! person,activity_type,x,y
//! 1034561,home,363100.0,5690200.0
//! 1034561,car interaction,363150.0,5690210.0
//! 1034561,work,367800.0,5693000.0
//! ```
//!
//! A person's **reference location** is the coordinate of their first
//! activity that is not an interaction activity.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ms_core::{AgentId, Coord};
use ms_events::is_interaction;
use ms_output::AgentFilter;
use ms_spatial::SpatialFilter;

use crate::AnalyzerResult;

// ── Population ────────────────────────────────────────────────────────────────

/// Reference location of every person in a population file.
#[derive(Debug, Default, Clone)]
pub struct Population {
    locations: HashMap<AgentId, Coord>,
    /// Persons whose plan has no real activity.
    unlocated: HashSet<AgentId>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one planned activity.  Only the first real activity of a
    /// person counts.
    pub fn add_activity(&mut self, person: AgentId, activity_type: &str, coord: Coord) {
        if self.locations.contains_key(&person) {
            return;
        }
        if is_interaction(activity_type) {
            self.unlocated.insert(person);
        } else {
            self.unlocated.remove(&person);
            self.locations.insert(person, coord);
        }
    }

    pub fn reference_location(&self, person: &AgentId) -> Option<Coord> {
        self.locations.get(person).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, Coord)> {
        self.locations.iter().map(|(p, c)| (p, *c))
    }

    /// Persons seen, with or without a reference location.
    pub fn person_count(&self) -> usize {
        self.locations.len() + self.unlocated.len()
    }

    pub fn located_count(&self) -> usize {
        self.locations.len()
    }
}

#[derive(Deserialize)]
struct ActivityRecord {
    person:        String,
    activity_type: String,
    x:             f64,
    y:             f64,
}

/// Load a [`Population`] from a plan-activities CSV file.
pub fn load_population_csv(path: &Path) -> AnalyzerResult<Population> {
    let file = std::fs::File::open(path)?;
    let population = read_population(file)?;
    log::info!(
        "loaded {} persons ({} with a reference location) from {}",
        population.person_count(),
        population.located_count(),
        path.display(),
    );
    Ok(population)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
pub fn read_population<R: Read>(reader: R) -> AnalyzerResult<Population> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut population = Population::new();
    for result in csv_reader.deserialize::<ActivityRecord>() {
        let row = result?;
        population.add_activity(AgentId::from(row.person), &row.activity_type, Coord::new(row.x, row.y));
    }
    Ok(population)
}

// ── HomeInRegion ──────────────────────────────────────────────────────────────

/// Accepts agents whose reference location lies inside the study region.
///
/// Membership is evaluated once, at construction; lookups are a set probe.
#[derive(Debug, Clone, Default)]
pub struct HomeInRegion {
    accepted: HashSet<AgentId>,
}

impl HomeInRegion {
    pub fn new(population: &Population, region: &SpatialFilter) -> Self {
        let accepted: HashSet<AgentId> = population
            .iter()
            .filter(|(_, coord)| region.contains(*coord))
            .map(|(person, _)| person.clone())
            .collect();
        log::info!(
            "{} of {} persons live inside the study region",
            accepted.len(),
            population.person_count(),
        );
        Self { accepted }
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl AgentFilter for HomeInRegion {
    fn accepts(&self, agent: &AgentId) -> bool {
        self.accepted.contains(agent)
    }
}
