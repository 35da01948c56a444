//! Unit tests for ms-events.

use ms_core::{AgentId, Coord, LinkId, TransportMode};

use crate::{ActivityEvent, Event, EventError, EventHandler};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EVENTS_CSV: &str = "\
time,type,person,actType,x,y,link,legMode\n\
0,TransitDriverStarts,pt_bus_12,,,,,\n\
21600,actend,p1,home,0.0,0.0,l1,\n\
21600,departure,p1,,,,l1,walk\n\
21700,left link,,,,,l1,\n\
22200,departure,p1,,,,l1,car\n\
22480,actstart,p1,work,,,l2,\n\
";

/// Records every event kind it sees, failing on demand.
#[derive(Default)]
struct Recorder {
    kinds:   Vec<String>,
    fail_on: Option<&'static str>,
    ended:   bool,
}

impl EventHandler for Recorder {
    type Error = EventError;

    fn handle_event(&mut self, event: &Event) -> Result<(), EventError> {
        if self.fail_on == Some(event.kind()) {
            return Err(EventError::MissingField { row: 0, kind: event.kind().to_owned(), field: "test" });
        }
        self.kinds.push(event.kind().to_owned());
        Ok(())
    }

    fn on_stream_end(&mut self) -> Result<(), EventError> {
        self.ended = true;
        Ok(())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event {
    use super::*;
    use crate::is_interaction;

    #[test]
    fn interaction_suffix() {
        assert!(is_interaction("car interaction"));
        assert!(is_interaction("pt interaction"));
        assert!(!is_interaction("home"));
        assert!(!is_interaction("interaction"), "bare word is a real activity type");
    }

    #[test]
    fn accessors() {
        let e = Event::ActivityStart(ActivityEvent {
            agent:    AgentId::new("p"),
            time:     42.0,
            act_type: "work".into(),
            coord:    None,
            link:     Some(LinkId::new("l")),
        });
        assert_eq!(e.time(), 42.0);
        assert_eq!(e.agent().map(AgentId::as_str), Some("p"));
        assert_eq!(e.kind(), "actstart");

        let leave = Event::LinkLeave { link: LinkId::new("l"), time: 7.0 };
        assert!(leave.agent().is_none());
        assert_eq!(leave.time(), 7.0);
        assert_eq!(leave.kind(), "left link");

        let other = Event::Other { time: 1.0, kind: "entered link".into() };
        assert!(other.agent().is_none());
        assert_eq!(other.kind(), "entered link");
    }
}

// ── Reader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reader {
    use std::io::{Cursor, Write};

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;
    use crate::{open_events, EventReader};

    fn read_all(csv: &str) -> Vec<Event> {
        EventReader::new(Cursor::new(csv.to_owned()))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn parses_every_kind() {
        let events = read_all(EVENTS_CSV);
        let kinds: Vec<&str> = events.iter().map(Event::kind).collect();
        assert_eq!(
            kinds,
            ["TransitDriverStarts", "actend", "departure", "left link", "departure", "actstart"]
        );
    }

    #[test]
    fn activity_fields() {
        let events = read_all(EVENTS_CSV);
        let Event::ActivityEnd(end) = &events[1] else { panic!("expected actend") };
        assert_eq!(end.agent, AgentId::new("p1"));
        assert_eq!(end.act_type, "home");
        assert_eq!(end.coord, Some(Coord::new(0.0, 0.0)));
        assert_eq!(end.link, Some(LinkId::new("l1")));

        let Event::ActivityStart(start) = &events[5] else { panic!("expected actstart") };
        assert_eq!(start.coord, None, "no x/y means link lookup");
        assert_eq!(start.link, Some(LinkId::new("l2")));
    }

    #[test]
    fn departure_mode_and_driver() {
        let events = read_all(EVENTS_CSV);
        assert_eq!(
            events[4],
            Event::Departure { agent: AgentId::new("p1"), time: 22200.0, leg_mode: TransportMode::Car }
        );
        assert_eq!(
            events[0],
            Event::TransitOperatorStart { agent: AgentId::new("pt_bus_12"), time: 0.0 }
        );
    }

    #[test]
    fn link_leave() {
        let events = read_all(EVENTS_CSV);
        assert_eq!(events[3], Event::LinkLeave { link: LinkId::new("l1"), time: 21700.0 });

        let csv = "time,type,person,actType,x,y,link,legMode\n5,left link,,,,,,\n";
        let err = EventReader::new(Cursor::new(csv)).next().unwrap().unwrap_err();
        assert!(matches!(err, EventError::MissingField { row: 1, field: "link", .. }));
    }

    #[test]
    fn half_a_coordinate_is_no_coordinate() {
        let csv = "time,type,person,actType,x,y,link,legMode\n1,actend,p,home,5.0,,l,\n";
        let events = read_all(csv);
        let Event::ActivityEnd(end) = &events[0] else { panic!("expected actend") };
        assert_eq!(end.coord, None);
    }

    #[test]
    fn missing_leg_mode_is_an_error() {
        let csv = "time,type,person,actType,x,y,link,legMode\n1,departure,p,,,,l,\n";
        let err = EventReader::new(Cursor::new(csv)).next().unwrap().unwrap_err();
        assert!(matches!(err, EventError::MissingField { row: 1, field: "legMode", .. }));
    }

    #[test]
    fn unused_columns_may_be_absent() {
        let csv = "time,type,person,legMode\n3,departure,p,bike\n";
        let events = read_all(csv);
        assert_eq!(
            events[0],
            Event::Departure { agent: AgentId::new("p"), time: 3.0, leg_mode: TransportMode::Bike }
        );
    }

    #[test]
    fn gzip_file_is_decompressed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("output_events.csv.gz");
        let mut gz = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        gz.write_all(EVENTS_CSV.as_bytes()).unwrap();
        gz.finish().unwrap();

        let events: Vec<Event> = open_events(&path).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn plain_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("events.csv");
        std::fs::write(&path, EVENTS_CSV).unwrap();
        assert_eq!(open_events(&path).unwrap().count(), 6);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use std::io::Cursor;

    use super::*;
    use crate::{process_events, EventReader};

    #[test]
    fn delivers_in_order_and_signals_end() {
        let mut rec = Recorder::default();
        let n = process_events(EventReader::new(Cursor::new(EVENTS_CSV)), &mut rec).unwrap();
        assert_eq!(n, 6);
        assert_eq!(rec.kinds.first().map(String::as_str), Some("TransitDriverStarts"));
        assert_eq!(rec.kinds.last().map(String::as_str), Some("actstart"));
        assert!(rec.ended);
    }

    #[test]
    fn handler_error_stops_the_stream() {
        let mut rec = Recorder { fail_on: Some("departure"), ..Default::default() };
        let result = process_events(EventReader::new(Cursor::new(EVENTS_CSV)), &mut rec);
        assert!(result.is_err());
        assert_eq!(rec.kinds, ["TransitDriverStarts", "actend"]);
        assert!(!rec.ended);
    }

    #[test]
    fn read_error_is_propagated() {
        let csv = "time,type,person,actType,x,y,link,legMode\nnot-a-number,actend,p,home,,,l,\n";
        let mut rec = Recorder::default();
        let result = process_events(EventReader::new(Cursor::new(csv)), &mut rec);
        assert!(matches!(result, Err(EventError::Csv(_))));
    }
}
