//! One-call analysis run from an [`AnalysisConfig`].

use std::sync::Arc;

use ms_output::OutputError;
use ms_spatial::{load_network_csv, load_regions_csv, SpatialFilter};

use crate::{
    load_population_csv, AnalysisConfig, AnalyzerError, AnalyzerResult, Chain, Controler,
    EventFile, HomeInRegion, IterationReport, LinkLeaveAnalyzer, LinkLeaveCounter, LinkLeaveReport,
    OutputDirectory, TripAnalyzer,
};

/// Results of both analyses for the final iteration.
#[derive(Debug)]
pub struct AnalysisReport {
    pub trips: IterationReport,
    pub links: LinkLeaveReport,
}

impl AnalysisReport {
    pub fn iteration(&self) -> u32 {
        self.trips.iteration
    }

    /// Every report that could not be written.
    pub fn failures(&self) -> impl Iterator<Item = &OutputError> {
        self.trips.failures.iter().chain(&self.links.failures)
    }
}

/// Load every input named by `config`, replay the events file through the
/// iteration loop, and return the final iteration's reports.
///
/// The trip analyzer and the link-leave counter share one pass over the
/// events.  Input, reconstruction and counting errors abort the run.
/// Report write failures do not; they are listed in the returned report.
pub fn run_analysis(config: &AnalysisConfig) -> AnalyzerResult<AnalysisReport> {
    config.validate()?;

    let network = Arc::new(load_network_csv(&config.network)?);
    let features = load_regions_csv(&config.regions)?;
    let region = SpatialFilter::from_features(features, |f| config.keeps_region(f))?;
    let population = load_population_csv(&config.population)?;
    let filter = HomeInRegion::new(&population, &region);
    let output = OutputDirectory::new(&config.output_dir);

    let trips = TripAnalyzer::new(Arc::clone(&network), filter, output.clone());
    let links = LinkLeaveAnalyzer::new(LinkLeaveCounter::new(network, &region), output);
    let mut listeners = Chain::new(trips, links);
    let mut controler = Controler::new(config.controler(), EventFile::new(&config.events))?;
    controler.run(&mut listeners)?;

    // The final iteration always attaches, so a completed run has reports.
    let unfinished =
        || AnalyzerError::Config("run finished without reaching its last iteration".into());
    let (mut trips, mut links) = listeners.into_inner();
    Ok(AnalysisReport {
        trips: trips.take_report().ok_or_else(unfinished)?,
        links: links.take_report().ok_or_else(unfinished)?,
    })
}
