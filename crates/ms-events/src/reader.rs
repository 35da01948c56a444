//! CSV event-file reader.
//!
//! # CSV format
//!
//! One row per event, in simulation order.  Columns an event kind does not
//! use are left empty.
//!
//! ```csv
//! time,type,person,actType,x,y,link,legMode
//! 21600,actend,1034561,home,363100.0,5690200.0,1001,
//! 21600,departure,1034561,,,,1001,walk
//! 22480,actstart,1034561,work,,,2210,
//! 0,TransitDriverStarts,pt_bus_12,,,,,
//! 21700,left link,,,,,1001,
//! ```
//!
//! **`type`** field:
//!
//! | Value                 | Event                                  |
//! |-----------------------|----------------------------------------|
//! | `actend`              | `Event::ActivityEnd`                   |
//! | `actstart`            | `Event::ActivityStart`                 |
//! | `departure`           | `Event::Departure`                     |
//! | `TransitDriverStarts` | `Event::TransitOperatorStart` (`person` is the driver) |
//! | `left link`           | `Event::LinkLeave`                     |
//! | *anything else*       | `Event::Other`                         |
//!
//! An activity event's coordinate is used only when both `x` and `y` are
//! present.  Files whose name ends in `.gz` are decompressed on the fly.
//!
//! The reader is a streaming iterator: memory use does not grow with the
//! file size.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::Deserialize;

use ms_core::{AgentId, Coord, LinkId, TransportMode};

use crate::{ActivityEvent, Event, EventError, EventResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    time: f64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    person: Option<String>,
    #[serde(default, rename = "actType")]
    act_type: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default, rename = "legMode")]
    leg_mode: Option<String>,
}

impl EventRecord {
    fn into_event(self, row: usize) -> EventResult<Event> {
        let missing = |kind: &str, field: &'static str| EventError::MissingField {
            row,
            kind: kind.to_owned(),
            field,
        };

        match self.kind.as_str() {
            "actend" | "actstart" => {
                let agent = non_empty(self.person).ok_or_else(|| missing(&self.kind, "person"))?;
                let act_type =
                    non_empty(self.act_type).ok_or_else(|| missing(&self.kind, "actType"))?;
                let coord = match (self.x, self.y) {
                    (Some(x), Some(y)) => Some(Coord::new(x, y)),
                    _ => None,
                };
                let activity = ActivityEvent {
                    agent: AgentId::from(agent),
                    time: self.time,
                    act_type,
                    coord,
                    link: non_empty(self.link).map(LinkId::from),
                };
                Ok(if self.kind == "actend" {
                    Event::ActivityEnd(activity)
                } else {
                    Event::ActivityStart(activity)
                })
            }
            "departure" => {
                let agent = non_empty(self.person).ok_or_else(|| missing(&self.kind, "person"))?;
                let leg_mode =
                    non_empty(self.leg_mode).ok_or_else(|| missing(&self.kind, "legMode"))?;
                Ok(Event::Departure {
                    agent:    AgentId::from(agent),
                    time:     self.time,
                    leg_mode: TransportMode::from(leg_mode),
                })
            }
            "TransitDriverStarts" => {
                let driver = non_empty(self.person).ok_or_else(|| missing(&self.kind, "person"))?;
                Ok(Event::TransitOperatorStart {
                    agent: AgentId::from(driver),
                    time:  self.time,
                })
            }
            "left link" => {
                let link = non_empty(self.link).ok_or_else(|| missing(&self.kind, "link"))?;
                Ok(Event::LinkLeave { link: LinkId::from(link), time: self.time })
            }
            _ => Ok(Event::Other { time: self.time, kind: self.kind }),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

// ── EventReader ───────────────────────────────────────────────────────────────

/// Streaming iterator over the events of a CSV source.
pub struct EventReader<R: Read> {
    records: csv::DeserializeRecordsIntoIter<R, EventRecord>,
    row:     usize,
}

impl<R: Read> EventReader<R> {
    pub fn new(reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize();
        Self { records, row: 0 }
    }
}

impl<R: Read> Iterator for EventReader<R> {
    type Item = EventResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;
        Some(match record {
            Ok(record) => record.into_event(self.row),
            Err(e) => Err(EventError::Csv(e)),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Open an events file, transparently gunzipping `*.gz` files.
pub fn open_events(path: &Path) -> EventResult<EventReader<Box<dyn Read>>> {
    let file = BufReader::new(File::open(path)?);
    let source: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    log::info!("reading events from {}", path.display());
    Ok(EventReader::new(source))
}
