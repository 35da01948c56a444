//! Link-leave counting inside the study area.
//!
//! Every `LinkLeave` event on a counted link adds one to that link's tally.
//! A link is **counted** when its representative coordinate lies inside the
//! study area (boundary included) and it is open to some mode other than
//! public transit.  The counted set is fixed when the counter is built.
//!
//! A leave event for a link the network does not know is a broken stream
//! and aborts the run.

use std::collections::HashSet;
use std::sync::Arc;

use ms_core::LinkId;
use ms_events::{Event, EventHandler};
use ms_output::{write_link_leave_report, CsvReportWriter, LinkLeaveCounts, OutputError};
use ms_spatial::{Network, SpatialFilter};

use crate::{AnalyzerError, AnalyzerResult, IterationContext, IterationListener, OutputDirectory};

// ── LinkLeaveCounter ──────────────────────────────────────────────────────────

/// Event handler tallying vehicles leaving the counted links.
pub struct LinkLeaveCounter {
    network: Arc<Network>,
    counted: HashSet<LinkId>,
    counts:  LinkLeaveCounts,
}

impl LinkLeaveCounter {
    pub fn new(network: Arc<Network>, area: &SpatialFilter) -> Self {
        let counted: HashSet<LinkId> = network
            .links()
            .filter(|(_, link)| !link.is_pt_only() && area.contains(link.coord()))
            .map(|(id, _)| id.clone())
            .collect();
        log::info!(
            "link-leave counter: {} of {} links counted",
            counted.len(),
            network.link_count(),
        );
        Self { network, counted, counts: LinkLeaveCounts::new() }
    }

    pub fn is_counted(&self, link: &LinkId) -> bool {
        self.counted.contains(link)
    }

    pub fn counts(&self) -> &LinkLeaveCounts {
        &self.counts
    }

    /// The counts gathered so far; the counter starts again from zero.
    pub fn take_counts(&mut self) -> LinkLeaveCounts {
        std::mem::take(&mut self.counts)
    }

    /// Apply one event.  Everything but `LinkLeave` is ignored.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::UnknownLink`] when the left link is not in the
    /// network.
    pub fn process(&mut self, event: &Event) -> AnalyzerResult<()> {
        let Event::LinkLeave { link, time } = event else {
            return Ok(());
        };
        if self.counted.contains(link) {
            let freespeed = self.network.link(link).and_then(|l| l.freespeed);
            self.counts.record(link, freespeed);
        } else if self.network.link(link).is_none() {
            return Err(AnalyzerError::UnknownLink { link: link.clone(), time: *time });
        }
        Ok(())
    }
}

impl EventHandler for LinkLeaveCounter {
    type Error = AnalyzerError;

    fn handle_event(&mut self, event: &Event) -> AnalyzerResult<()> {
        self.process(event)
    }

    fn on_stream_end(&mut self) -> AnalyzerResult<()> {
        log::debug!(
            "link-leave counting: {} leaves on {} links",
            self.counts.total(),
            self.counts.link_count(),
        );
        Ok(())
    }
}

// ── LinkLeaveAnalyzer ─────────────────────────────────────────────────────────

/// What the link-leave analyzer produced for the iteration it was attached
/// to.
#[derive(Debug)]
pub struct LinkLeaveReport {
    pub iteration: u32,
    pub counts:    LinkLeaveCounts,
    /// Empty when `link-leave-counts.csv` was written.
    pub failures:  Vec<OutputError>,
}

/// Iteration listener that counts link leaves in the final iteration and
/// writes `ITERS/it.<n>/link-leave-counts.csv` when it ends.
pub struct LinkLeaveAnalyzer {
    counter:  LinkLeaveCounter,
    output:   OutputDirectory,
    attached: bool,
    report:   Option<LinkLeaveReport>,
}

impl LinkLeaveAnalyzer {
    pub fn new(counter: LinkLeaveCounter, output: OutputDirectory) -> Self {
        Self { counter, output, attached: false, report: None }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn report(&self) -> Option<&LinkLeaveReport> {
        self.report.as_ref()
    }

    pub fn take_report(&mut self) -> Option<LinkLeaveReport> {
        self.report.take()
    }

    fn finish(&mut self, iteration: u32) -> LinkLeaveReport {
        let counts = self.counter.take_counts();
        log::info!("{} link leaves on {} counted links", counts.total(), counts.link_count());

        let dir = self.output.iteration_dir(iteration);
        let failures = match CsvReportWriter::new(&dir) {
            Ok(mut writer) => write_link_leave_report(&counts, &mut writer),
            Err(e) => {
                log::error!("cannot create report directory {}: {e}", dir.display());
                vec![e]
            }
        };
        LinkLeaveReport { iteration, counts, failures }
    }
}

impl EventHandler for LinkLeaveAnalyzer {
    type Error = AnalyzerError;

    fn handle_event(&mut self, event: &Event) -> AnalyzerResult<()> {
        if self.attached {
            self.counter.process(event)?;
        }
        Ok(())
    }

    fn on_stream_end(&mut self) -> AnalyzerResult<()> {
        if self.attached {
            self.counter.on_stream_end()?;
        }
        Ok(())
    }
}

impl IterationListener for LinkLeaveAnalyzer {
    fn on_iteration_start(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        if ctx.is_last {
            log::info!("iteration {}: attaching link-leave counter", ctx.iteration);
            self.attached = true;
        }
        Ok(())
    }

    fn wants_events(&self) -> bool {
        self.attached
    }

    fn on_iteration_end(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        if self.attached {
            self.attached = false;
            let report = self.finish(ctx.iteration);
            self.report = Some(report);
        }
        Ok(())
    }
}
