//! `TripAnalyzer` — reconstructs trips in the final iteration and writes
//! the modal-split reports when it ends.

use std::path::{Path, PathBuf};

use ms_events::{Event, EventHandler};
use ms_output::{log_summary, write_reports, AgentFilter, CsvReportWriter, OutputError, TripAggregate};
use ms_spatial::NetworkLookup;
use ms_trips::{ReconstructionStats, TripReconstructor};

use crate::{AnalyzerResult, IterationContext, IterationListener};

// ── OutputDirectory ───────────────────────────────────────────────────────────

/// Layout of a run's output tree.  Iteration `n` writes into
/// `<root>/ITERS/it.<n>/`.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn iteration_dir(&self, iteration: u32) -> PathBuf {
        self.root.join("ITERS").join(format!("it.{iteration}"))
    }

    pub fn iteration_file(&self, iteration: u32, name: &str) -> PathBuf {
        self.iteration_dir(iteration).join(name)
    }
}

// ── IterationReport ───────────────────────────────────────────────────────────

/// What the analyzer produced for the iteration it was attached to.
#[derive(Debug)]
pub struct IterationReport {
    pub iteration: u32,
    pub stats:     ReconstructionStats,
    pub aggregate: TripAggregate,
    /// Reports that could not be written.  Empty on full success.
    pub failures:  Vec<OutputError>,
}

// ── TripAnalyzer ──────────────────────────────────────────────────────────────

/// Iteration listener that rebuilds trips from the final iteration's events
/// and reports the modal split of the agents accepted by its filter.
///
/// Earlier iterations are ignored: no reconstructor exists until the final
/// iteration starts, and the analyzer declines their event streams.
pub struct TripAnalyzer<N: NetworkLookup + Clone, F: AgentFilter> {
    network:       N,
    filter:        F,
    output:        OutputDirectory,
    reconstructor: Option<TripReconstructor<N>>,
    report:        Option<IterationReport>,
}

impl<N: NetworkLookup + Clone, F: AgentFilter> TripAnalyzer<N, F> {
    pub fn new(network: N, filter: F, output: OutputDirectory) -> Self {
        Self {
            network,
            filter,
            output,
            reconstructor: None,
            report: None,
        }
    }

    /// `true` while attached to an iteration's event stream.
    pub fn is_attached(&self) -> bool {
        self.reconstructor.is_some()
    }

    pub fn report(&self) -> Option<&IterationReport> {
        self.report.as_ref()
    }

    pub fn take_report(&mut self) -> Option<IterationReport> {
        self.report.take()
    }

    /// Aggregate the reconstructed trips and write both reports.
    ///
    /// Write failures are logged and kept in the returned report; they never
    /// fail the iteration.
    fn finish(&self, iteration: u32, reconstructor: TripReconstructor<N>) -> IterationReport {
        let stats = *reconstructor.stats();
        let aggregate = TripAggregate::from_store(reconstructor.store(), &self.filter);
        log_summary(&aggregate);

        let dir = self.output.iteration_dir(iteration);
        let failures = match CsvReportWriter::new(&dir) {
            Ok(mut writer) => write_reports(&aggregate, &mut writer),
            Err(e) => {
                log::error!("cannot create report directory {}: {e}", dir.display());
                vec![e]
            }
        };
        IterationReport { iteration, stats, aggregate, failures }
    }
}

impl<N: NetworkLookup + Clone, F: AgentFilter> EventHandler for TripAnalyzer<N, F> {
    type Error = crate::AnalyzerError;

    fn handle_event(&mut self, event: &Event) -> AnalyzerResult<()> {
        if let Some(r) = self.reconstructor.as_mut() {
            r.process(event)?;
        }
        Ok(())
    }

    fn on_stream_end(&mut self) -> AnalyzerResult<()> {
        if let Some(r) = self.reconstructor.as_mut() {
            r.on_stream_end()?;
        }
        Ok(())
    }
}

impl<N: NetworkLookup + Clone, F: AgentFilter> IterationListener for TripAnalyzer<N, F> {
    fn on_iteration_start(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        if ctx.is_last {
            log::info!("iteration {}: attaching trip analyzer", ctx.iteration);
            self.reconstructor = Some(TripReconstructor::new(self.network.clone()));
        }
        Ok(())
    }

    fn wants_events(&self) -> bool {
        self.is_attached()
    }

    fn on_iteration_end(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        if let Some(reconstructor) = self.reconstructor.take() {
            let report = self.finish(ctx.iteration, reconstructor);
            self.report = Some(report);
        }
        Ok(())
    }
}
