//! Unit tests for ms-analyzer.

use std::path::Path;
use std::sync::Arc;

use ms_core::{AgentId, Coord, LinkId, TransportMode};
use ms_events::{ActivityEvent, Event, EventHandler};
use ms_spatial::{Network, NetworkBuilder};

use crate::{
    AnalyzerError, AnalyzerResult, EventSource, EventStream, IterationContext, IterationListener,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn network() -> Arc<Network> {
    let mut b = NetworkBuilder::new();
    b.add_link(LinkId::new("l1"), Coord::new(0.0, 0.0), Coord::new(200.0, 0.0)).unwrap();
    Arc::new(b.build())
}

fn activity(agent: &str, act_type: &str, x: f64, y: f64) -> ActivityEvent {
    ActivityEvent {
        agent:    AgentId::new(agent),
        time:     0.0,
        act_type: act_type.to_owned(),
        coord:    Some(Coord::new(x, y)),
        link:     None,
    }
}

/// `agent` goes from (0,0) to (0,`km` km) by `mode`.
fn commute(agent: &str, mode: &str, km: f64) -> Vec<Event> {
    vec![
        Event::ActivityEnd(activity(agent, "home", 0.0, 0.0)),
        Event::Departure { agent: AgentId::new(agent), time: 1.0, leg_mode: TransportMode::parse(mode) },
        Event::ActivityStart(activity(agent, "work", 0.0, km * 1000.0)),
    ]
}

fn leave(link: &str, time: f64) -> Event {
    Event::LinkLeave { link: LinkId::new(link), time }
}

/// Replays `events` for every iteration, recording which iterations opened
/// their stream.
struct CountingSource {
    events: Vec<Event>,
    opened: Vec<u32>,
}

impl EventSource for CountingSource {
    fn events(&mut self, iteration: u32) -> AnalyzerResult<EventStream<'_>> {
        self.opened.push(iteration);
        Ok(Box::new(self.events.iter().cloned().map(Ok)))
    }
}

/// A different stream for each iteration, indexed from zero.
struct PerIteration(Vec<Vec<Event>>);

impl EventSource for PerIteration {
    fn events(&mut self, iteration: u32) -> AnalyzerResult<EventStream<'_>> {
        let events = self.0.get(iteration as usize).cloned().unwrap_or_default();
        Ok(Box::new(events.into_iter().map(Ok)))
    }
}

/// Records lifecycle calls and event counts.
#[derive(Default)]
struct Recorder {
    log:    Vec<String>,
    events: usize,
}

impl EventHandler for Recorder {
    type Error = AnalyzerError;

    fn handle_event(&mut self, _event: &Event) -> AnalyzerResult<()> {
        self.events += 1;
        Ok(())
    }

    fn on_stream_end(&mut self) -> AnalyzerResult<()> {
        self.log.push(format!("end-of-stream:{}", self.events));
        Ok(())
    }
}

impl IterationListener for Recorder {
    fn on_iteration_start(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        self.log.push(format!("start:{}:{}", ctx.iteration, ctx.is_last));
        Ok(())
    }

    fn on_iteration_end(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        self.log.push(format!("end:{}", ctx.iteration));
        Ok(())
    }
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ── Controler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod controler {
    use super::*;
    use crate::{Controler, ControlerConfig, NoopListener};

    #[test]
    fn iterations_in_order_with_last_flag() {
        let source = PerIteration(vec![vec![], commute("a", "car", 1.0), vec![]]);
        let config = ControlerConfig { first_iteration: 1, last_iteration: 2 };
        let mut rec = Recorder::default();
        Controler::new(config, source).unwrap().run(&mut rec).unwrap();
        assert_eq!(
            rec.log,
            ["start:1:false", "end-of-stream:3", "end:1", "start:2:true", "end-of-stream:3", "end:2"]
        );
    }

    #[test]
    fn single_iteration_is_last() {
        let mut rec = Recorder::default();
        Controler::new(ControlerConfig::default(), Vec::<Event>::new())
            .unwrap()
            .run(&mut rec)
            .unwrap();
        assert_eq!(rec.log[0], "start:0:true");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = ControlerConfig { first_iteration: 5, last_iteration: 4 };
        assert!(matches!(Controler::new(config, Vec::<Event>::new()), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn range_check_is_shared_with_the_config() {
        let inverted = ControlerConfig { first_iteration: 3, last_iteration: 2 };
        let Err(AnalyzerError::Config(controler_msg)) = inverted.validate() else {
            panic!("inverted range accepted");
        };
        let text = "network = \"n\"\nregions = \"r\"\npopulation = \"p\"\nevents = \"e\"\n\
                    output_dir = \"o\"\nfirst_iteration = 3\nlast_iteration = 2\n";
        let Err(AnalyzerError::Config(config_msg)) = crate::AnalysisConfig::from_toml_str(text) else {
            panic!("inverted range accepted");
        };
        assert_eq!(controler_msg, config_msg);
        assert!(ControlerConfig { first_iteration: 2, last_iteration: 2 }.validate().is_ok());
    }

    #[test]
    fn memory_source_replays_every_iteration() {
        let mut source = commute("a", "walk", 0.5);
        let first: Vec<_> = source.events(0).unwrap().collect::<Result<_, _>>().unwrap();
        let second: Vec<_> = source.events(1).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn noop_listener_runs() {
        let mut c = Controler::new(ControlerConfig::default(), commute("a", "car", 1.0)).unwrap();
        c.run(&mut NoopListener).unwrap();
    }
}

// ── TripAnalyzer ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod analyzer {
    use ms_output::{AcceptAll, MODAL_DISTANCE_SHARE_FILE, MODAL_SHARE_FILE};

    use super::*;
    use crate::{Controler, ControlerConfig, OutputDirectory, TripAnalyzer};

    fn residents(agent: &AgentId) -> bool {
        agent.as_str().starts_with('r')
    }

    #[test]
    fn output_layout() {
        let out = OutputDirectory::new("/runs/velbert");
        assert_eq!(out.iteration_dir(7), Path::new("/runs/velbert/ITERS/it.7"));
        assert_eq!(
            out.iteration_file(0, MODAL_SHARE_FILE),
            Path::new("/runs/velbert/ITERS/it.0/modal-share.csv")
        );
    }

    #[test]
    fn attaches_only_to_the_last_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDirectory::new(dir.path());
        let mut analyzer = TripAnalyzer::new(network(), AcceptAll, out.clone());

        analyzer.on_iteration_start(IterationContext { iteration: 0, is_last: false }).unwrap();
        assert!(!analyzer.is_attached());
        // Without a reconstructor a broken stream is harmless.
        analyzer
            .handle_event(&Event::Departure { agent: AgentId::new("x"), time: 0.0, leg_mode: TransportMode::Car })
            .unwrap();
        analyzer.on_iteration_end(IterationContext { iteration: 0, is_last: false }).unwrap();
        assert!(analyzer.report().is_none());
        assert!(!out.iteration_dir(0).exists());

        analyzer.on_iteration_start(IterationContext { iteration: 1, is_last: true }).unwrap();
        assert!(analyzer.is_attached());
    }

    #[test]
    fn reports_written_for_last_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDirectory::new(dir.path());
        let mut events = commute("r1", "car", 2.0);
        events.extend(commute("r2", "walk", 0.5));
        events.extend(commute("v1", "bike", 4.0));
        // r3 never arrives.
        events.push(Event::ActivityEnd(activity("r3", "home", 0.0, 0.0)));

        let source = PerIteration(vec![vec![], events]);
        let config = ControlerConfig { first_iteration: 0, last_iteration: 1 };
        let mut analyzer = TripAnalyzer::new(network(), residents, out.clone());
        Controler::new(config, source).unwrap().run(&mut analyzer).unwrap();

        let report = analyzer.take_report().unwrap();
        assert_eq!(report.iteration, 1);
        assert!(report.failures.is_empty());
        assert_eq!(report.aggregate.eligible_trips(), 2);
        assert_eq!(report.aggregate.participants(), 2);
        assert_eq!(report.stats.trips_open(), 1);

        let share = std::fs::read_to_string(out.iteration_file(1, MODAL_SHARE_FILE)).unwrap();
        assert_eq!(share, "mode;count;share\ncar;1;0.5\nwalk;1;0.5\n");
        let distance = out.iteration_file(1, MODAL_DISTANCE_SHARE_FILE);
        assert_eq!(std::fs::read_to_string(distance).unwrap().lines().count(), 26);
        assert!(!out.iteration_dir(0).exists());
    }

    #[test]
    fn streams_skipped_until_the_last_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource { events: commute("a", "car", 1.0), opened: Vec::new() };
        let config = ControlerConfig { first_iteration: 0, last_iteration: 3 };
        let mut analyzer = TripAnalyzer::new(network(), AcceptAll, OutputDirectory::new(dir.path()));
        let mut controler = Controler::new(config, source).unwrap();
        controler.run(&mut analyzer).unwrap();

        assert_eq!(controler.into_source().opened, [3]);
        assert_eq!(analyzer.report().unwrap().aggregate.eligible_trips(), 1);
    }

    #[test]
    fn reconstruction_error_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let events = vec![Event::ActivityStart(activity("x", "work", 0.0, 0.0))];
        let mut analyzer = TripAnalyzer::new(network(), AcceptAll, OutputDirectory::new(dir.path()));
        let result = Controler::new(ControlerConfig::default(), events).unwrap().run(&mut analyzer);
        assert!(matches!(result, Err(AnalyzerError::Trip(_))));
        assert!(analyzer.report().is_none());
    }

    #[test]
    fn write_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDirectory::new(dir.path());
        std::fs::create_dir_all(out.iteration_file(0, MODAL_SHARE_FILE)).unwrap();

        let mut analyzer = TripAnalyzer::new(network(), AcceptAll, out.clone());
        Controler::new(ControlerConfig::default(), commute("a", "pt", 6.0))
            .unwrap()
            .run(&mut analyzer)
            .unwrap();

        let report = analyzer.report().unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(out.iteration_file(0, MODAL_DISTANCE_SHARE_FILE).is_file());
    }
}

// ── Link leaves ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod links {
    use std::io::Cursor;

    use ms_output::{AcceptAll, LINK_LEAVE_COUNTS_FILE, MODAL_SHARE_FILE};
    use ms_spatial::{read_regions, Link, SpatialFilter};

    use super::*;
    use crate::{
        Chain, Controler, ControlerConfig, LinkLeaveAnalyzer, LinkLeaveCounter, NoopListener,
        OutputDirectory, TripAnalyzer,
    };

    fn area() -> SpatialFilter {
        let features =
            read_regions(Cursor::new("wkt\n\"POLYGON((-10 -10,500 -10,500 500,-10 500,-10 -10))\"\n")).unwrap();
        SpatialFilter::from_features(features, |_| true).unwrap()
    }

    /// `road` inside, `rail` inside but pt-only, `far` outside, `edge` with
    /// its midpoint on the area boundary.
    fn links_network() -> Arc<Network> {
        let mut b = NetworkBuilder::new();
        b.insert_link(
            LinkId::new("road"),
            Link::new(Coord::new(0.0, 0.0), Coord::new(200.0, 0.0))
                .with_freespeed(13.89)
                .with_modes([TransportMode::Car, TransportMode::Ride]),
        )
        .unwrap();
        b.insert_link(
            LinkId::new("rail"),
            Link::new(Coord::new(0.0, 0.0), Coord::new(0.0, 200.0))
                .with_freespeed(22.22)
                .with_modes([TransportMode::Pt]),
        )
        .unwrap();
        b.insert_link(
            LinkId::new("far"),
            Link::new(Coord::new(5000.0, 5000.0), Coord::new(5200.0, 5000.0)).with_modes([TransportMode::Car]),
        )
        .unwrap();
        b.insert_link(LinkId::new("edge"), Link::new(Coord::new(500.0, 0.0), Coord::new(500.0, 200.0)))
            .unwrap();
        Arc::new(b.build())
    }

    fn counter() -> LinkLeaveCounter {
        LinkLeaveCounter::new(links_network(), &area())
    }

    #[test]
    fn counts_road_links_inside_the_area() {
        let mut c = counter();
        for e in [leave("road", 1.0), leave("rail", 2.0), leave("far", 3.0), leave("road", 4.0), leave("edge", 5.0)] {
            c.process(&e).unwrap();
        }
        c.process(&Event::Other { time: 6.0, kind: "entered link".into() }).unwrap();

        assert!(c.is_counted(&LinkId::new("road")));
        assert!(c.is_counted(&LinkId::new("edge")), "boundary counts as inside");
        assert!(!c.is_counted(&LinkId::new("rail")), "pt-only links are skipped");
        assert!(!c.is_counted(&LinkId::new("far")));

        let counts = c.counts();
        assert_eq!(counts.leaves(&LinkId::new("road")), 2);
        assert_eq!(counts.leaves(&LinkId::new("edge")), 1);
        assert_eq!(counts.leaves(&LinkId::new("rail")), 0);
        assert_eq!(counts.total(), 3);
        let rows = counts.rows();
        assert_eq!((rows[1].link.as_str(), rows[1].freespeed), ("road", Some(13.89)));
        assert_eq!(rows[0].freespeed, None);
    }

    #[test]
    fn unknown_link_is_an_error() {
        let err = counter().process(&leave("nowhere", 9.0)).unwrap_err();
        assert!(matches!(err, AnalyzerError::UnknownLink { ref link, time } if link.as_str() == "nowhere" && time == 9.0));
    }

    #[test]
    fn take_counts_starts_over() {
        let mut c = counter();
        c.process(&leave("road", 1.0)).unwrap();
        assert_eq!(c.take_counts().total(), 1);
        assert!(c.counts().is_empty());
    }

    #[test]
    fn report_written_for_last_iteration_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDirectory::new(dir.path());
        let mut analyzer = LinkLeaveAnalyzer::new(counter(), out.clone());
        let source = PerIteration(vec![
            vec![leave("road", 1.0), leave("nowhere", 2.0)],
            vec![leave("road", 1.0), leave("far", 2.0), leave("road", 3.0)],
        ]);
        let config = ControlerConfig { first_iteration: 0, last_iteration: 1 };
        Controler::new(config, source).unwrap().run(&mut analyzer).unwrap();

        assert!(!analyzer.is_attached());
        let report = analyzer.take_report().unwrap();
        assert_eq!(report.iteration, 1);
        assert!(report.failures.is_empty());
        assert_eq!(report.counts.total(), 2);
        let text = std::fs::read_to_string(out.iteration_file(1, LINK_LEAVE_COUNTS_FILE)).unwrap();
        assert_eq!(text, "link;count;freespeed\nroad;2;13.89\n");
        assert!(!out.iteration_dir(0).exists());
    }

    #[test]
    fn chain_feeds_both_analyzers() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDirectory::new(dir.path());
        let mut events = commute("a", "car", 1.0);
        events.insert(2, leave("road", 2.0));

        let trips = TripAnalyzer::new(links_network(), AcceptAll, out.clone());
        let links = LinkLeaveAnalyzer::new(counter(), out.clone());
        let mut chain = Chain::new(trips, links);
        assert!(!chain.wants_events());
        Controler::new(ControlerConfig::default(), events).unwrap().run(&mut chain).unwrap();

        let (mut trips, mut links) = chain.into_inner();
        assert_eq!(trips.take_report().unwrap().aggregate.eligible_trips(), 1);
        assert_eq!(links.take_report().unwrap().counts.total(), 1);
        assert!(out.iteration_file(0, MODAL_SHARE_FILE).is_file());
        assert!(out.iteration_file(0, LINK_LEAVE_COUNTS_FILE).is_file());
    }

    #[test]
    fn chain_wants_events_if_either_does() {
        let dir = tempfile::tempdir().unwrap();
        let detached = LinkLeaveAnalyzer::new(counter(), OutputDirectory::new(dir.path()));
        assert!(Chain::new(detached, NoopListener).wants_events());
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use ms_events::process_events;
    use ms_output::{AcceptAll, MODAL_DISTANCE_SHARE_FILE, MODAL_SHARE_FILE};
    use ms_trips::TripReconstructor;

    use super::*;
    use crate::{Controler, ControlerConfig, IterationReport, OutputDirectory, TripAnalyzer};

    /// Known and unknown modes, agents interleaved, one trip left open.
    fn stream() -> Vec<Event> {
        let commutes = [
            commute("a", "car", 2.0),
            commute("b", "drt", 0.5),
            commute("c", "scooter", 4.0),
            commute("d", "walk", 0.8),
            commute("e", "drt", 12.0),
        ];
        let mut events: Vec<Event> = (0..3)
            .flat_map(|step| commutes.iter().map(move |c| c[step].clone()))
            .collect();
        events.push(Event::ActivityEnd(activity("f", "home", 0.0, 0.0)));
        events
    }

    fn analyze(dir: &Path) -> (IterationReport, Vec<u8>, Vec<u8>) {
        let out = OutputDirectory::new(dir);
        let mut analyzer = TripAnalyzer::new(network(), AcceptAll, out.clone());
        let config = ControlerConfig { first_iteration: 0, last_iteration: 1 };
        Controler::new(config, stream()).unwrap().run(&mut analyzer).unwrap();
        (
            analyzer.take_report().unwrap(),
            std::fs::read(out.iteration_file(1, MODAL_SHARE_FILE)).unwrap(),
            std::fs::read(out.iteration_file(1, MODAL_DISTANCE_SHARE_FILE)).unwrap(),
        )
    }

    #[test]
    fn same_stream_gives_byte_identical_reports() {
        let (d1, d2) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());
        let (report1, share1, distance1) = analyze(d1.path());
        let (report2, share2, distance2) = analyze(d2.path());

        assert_eq!(share1, share2);
        assert_eq!(distance1, distance2);
        assert_eq!(report1.aggregate, report2.aggregate);
        assert_eq!(report1.stats, report2.stats);
        assert_eq!(
            String::from_utf8(share1).unwrap(),
            "mode;count;share\ncar;1;0.2\nwalk;1;0.2\ndrt;2;0.4\nscooter;1;0.2\n"
        );
    }

    #[test]
    fn same_stream_gives_identical_trips() {
        let mut r1 = TripReconstructor::new(network());
        let mut r2 = TripReconstructor::new(network());
        process_events(stream().into_iter().map(Ok), &mut r1).unwrap();
        process_events(stream().into_iter().map(Ok), &mut r2).unwrap();

        assert_eq!(r1.store(), r2.store());
        assert_eq!(r1.stats(), r2.stats());
        assert_eq!(r1.store().trip_count(), 6);
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use std::io::Cursor;

    use ms_output::AgentFilter;
    use ms_spatial::{read_regions, SpatialFilter};

    use super::*;
    use crate::{read_population, HomeInRegion};

    const PLANS_CSV: &str = "\
person,activity_type,x,y\n\
inside,home,100.0,100.0\n\
inside,work,9000.0,9000.0\n\
commuter,car interaction,50.0,50.0\n\
commuter,home,9000.0,100.0\n\
commuter,work,100.0,100.0\n\
stager,pt interaction,10.0,10.0\n\
edge,home,1000.0,500.0\n\
";

    fn region() -> SpatialFilter {
        let features =
            read_regions(Cursor::new("wkt\n\"POLYGON((0 0,1000 0,1000 1000,0 1000,0 0))\"\n")).unwrap();
        SpatialFilter::from_features(features, |_| true).unwrap()
    }

    #[test]
    fn first_real_activity_is_the_reference() {
        let pop = read_population(Cursor::new(PLANS_CSV)).unwrap();
        assert_eq!(pop.reference_location(&AgentId::new("inside")), Some(Coord::new(100.0, 100.0)));
        assert_eq!(pop.reference_location(&AgentId::new("commuter")), Some(Coord::new(9000.0, 100.0)));
        assert_eq!(pop.reference_location(&AgentId::new("stager")), None);
        assert_eq!(pop.person_count(), 4);
        assert_eq!(pop.located_count(), 3);
    }

    #[test]
    fn home_in_region_filter() {
        let pop = read_population(Cursor::new(PLANS_CSV)).unwrap();
        let filter = HomeInRegion::new(&pop, &region());
        assert!(filter.accepts(&AgentId::new("inside")));
        assert!(filter.accepts(&AgentId::new("edge")), "boundary counts as inside");
        assert!(!filter.accepts(&AgentId::new("commuter")), "interaction location is skipped");
        assert!(!filter.accepts(&AgentId::new("stager")));
        assert!(!filter.accepts(&AgentId::new("unknown")));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn bad_row_is_an_error() {
        let csv = "person,activity_type,x,y\np,home,not-a-number,1\n";
        assert!(matches!(read_population(Cursor::new(csv)), Err(AnalyzerError::Population(_))));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use ms_spatial::read_regions;

    use super::*;
    use crate::AnalysisConfig;

    const MINIMAL: &str = r#"
network    = "network.csv"
regions    = "regions.csv"
population = "plans.csv"
events     = "events.csv.gz"
output_dir = "out"
"#;

    #[test]
    fn defaults() {
        let c = AnalysisConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(c.first_iteration, 0);
        assert_eq!(c.last_iteration, 0);
        assert_eq!(c.region_attribute, None);
        assert!(c.region_values.is_empty());
        assert_eq!(c.events, PathBuf::from("events.csv.gz"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let text = format!("{MINIMAL}\nsample_size = 0.1\n");
        assert!(matches!(AnalysisConfig::from_toml_str(&text), Err(AnalyzerError::ConfigParse(_))));
    }

    #[test]
    fn inverted_iterations_are_rejected() {
        let text = format!("{MINIMAL}\nfirst_iteration = 3\nlast_iteration = 2\n");
        assert!(matches!(AnalysisConfig::from_toml_str(&text), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn values_need_an_attribute() {
        let text = format!("{MINIMAL}\nregion_values = [\"42551\"]\n");
        assert!(matches!(AnalysisConfig::from_toml_str(&text), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let text = MINIMAL.replace("\"out\"", "\"/abs/out\"");
        let path = write(dir.path(), "analysis.toml", &text);
        let c = AnalysisConfig::load(&path).unwrap();
        assert_eq!(c.network, dir.path().join("network.csv"));
        assert_eq!(c.output_dir, PathBuf::from("/abs/out"));
    }

    #[test]
    fn region_selection_by_attribute() {
        let text = format!("{MINIMAL}\nregion_attribute = \"plz\"\nregion_values = [\"42551\", \"42549\"]\n");
        let c = AnalysisConfig::from_toml_str(&text).unwrap();
        let features = read_regions(std::io::Cursor::new(
            "wkt,plz\n\"POINT(0 0)\",42551\n\"POINT(1 1)\",40210\n",
        ))
        .unwrap();
        assert!(c.keeps_region(&features[0]));
        assert!(!c.keeps_region(&features[1]));

        let all = AnalysisConfig::from_toml_str(MINIMAL).unwrap();
        assert!(all.keeps_region(&features[1]));
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;
    use crate::{run_analysis, AnalysisConfig, OutputDirectory};

    #[test]
    fn full_run_from_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "network.csv",
            "link_id,from_x,from_y,to_x,to_y,freespeed,modes\n\
             l1,0,0,200,0,13.89,\"car,bike\"\n\
             l2,0,1000,0,3000,27.78,car\n\
             p1,0,0,0,100,22.22,pt\n",
        );
        write(
            dir.path(),
            "regions.csv",
            "wkt,plz\n\
             \"POLYGON((-10 -10,500 -10,500 500,-10 500,-10 -10))\",42551\n\
             \"POLYGON((5000 5000,6000 5000,6000 6000,5000 6000,5000 5000))\",40210\n",
        );
        write(
            dir.path(),
            "plans.csv",
            "person,activity_type,x,y\nr1,home,100,0\nr1,work,0,3000\nv1,home,5500,5500\n",
        );
        write(
            dir.path(),
            "events.csv",
            "time,type,person,actType,x,y,link,legMode\n\
             0,TransitDriverStarts,bus1,,,,,\n\
             10,actend,bus1,pt start,0,0,l1,\n\
             21600,actend,r1,home,,,l1,\n\
             21600,departure,r1,,,,l1,walk\n\
             21650,left link,,,,,l1,\n\
             21660,left link,,,,,l2,\n\
             21670,left link,,,,,p1,\n\
             21700,actstart,r1,pt interaction,,,l1,\n\
             21700,actend,r1,pt interaction,,,l1,\n\
             21700,departure,r1,,,,l1,pt\n\
             22400,actstart,r1,work,,,l2,\n\
             25000,actend,v1,home,5500,5500,,\n\
             25000,departure,v1,,,,,car\n\
             26000,actstart,v1,shop,5500,9000,,\n",
        );
        let toml = "\
network          = \"network.csv\"
regions          = \"regions.csv\"
region_attribute = \"plz\"
region_values    = [\"42551\"]
population       = \"plans.csv\"
events           = \"events.csv\"
output_dir       = \"output\"
first_iteration  = 0
last_iteration   = 2
";
        let config = AnalysisConfig::load(&write(dir.path(), "analysis.toml", toml)).unwrap();
        let report = run_analysis(&config).unwrap();

        assert_eq!(report.iteration(), 2);
        assert_eq!(report.failures().count(), 0);
        // r1: walk + pt from link l1 midpoint (100,0) to l2 midpoint (0,2000).
        assert_eq!(report.trips.aggregate.eligible_trips(), 1);
        assert_eq!(report.trips.aggregate.mode_count(&TransportMode::Pt), 1);
        assert_eq!(report.trips.stats.transit_operators, 1);
        // l2 lies outside the region and p1 is pt-only.
        assert_eq!(report.links.counts.total(), 1);

        let out = OutputDirectory::new(dir.path().join("output"));
        let share = std::fs::read_to_string(out.iteration_file(2, "modal-share.csv")).unwrap();
        assert_eq!(share, "mode;count;share\npt;1;1\n");
        let distance = std::fs::read_to_string(out.iteration_file(2, "modal-distance-share.csv")).unwrap();
        assert!(distance.contains("1-3;pt;1;1\n"));
        assert!(distance.contains("1-3;car;0;0\n"));
        let links = std::fs::read_to_string(out.iteration_file(2, "link-leave-counts.csv")).unwrap();
        assert_eq!(links, "link;count;freespeed\nl1;1;13.89\n");
        assert!(!out.iteration_dir(1).exists());
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::from_toml_str(&format!(
            "network = {:?}\nregions = \"r\"\npopulation = \"p\"\nevents = \"e\"\noutput_dir = \"o\"\n",
            dir.path().join("missing.csv").display().to_string(),
        ))
        .unwrap();
        assert!(matches!(run_analysis(&config), Err(AnalyzerError::Spatial(_))));
    }
}
