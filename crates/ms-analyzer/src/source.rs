//! Where each iteration's events come from.

use std::path::{Path, PathBuf};

use ms_events::{open_events, Event, EventResult};

use crate::AnalyzerResult;

/// A boxed event iterator borrowed from its source.
pub type EventStream<'a> = Box<dyn Iterator<Item = EventResult<Event>> + 'a>;

/// Supplies the event stream of an iteration.
pub trait EventSource {
    fn events(&mut self, iteration: u32) -> AnalyzerResult<EventStream<'_>>;
}

/// Replays one recorded events file (CSV, optionally gzipped) for every
/// iteration.
#[derive(Debug, Clone)]
pub struct EventFile {
    path: PathBuf,
}

impl EventFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for EventFile {
    fn events(&mut self, _iteration: u32) -> AnalyzerResult<EventStream<'_>> {
        Ok(Box::new(open_events(&self.path)?))
    }
}

/// Events held in memory, replayed for every iteration.
impl EventSource for Vec<Event> {
    fn events(&mut self, _iteration: u32) -> AnalyzerResult<EventStream<'_>> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}
