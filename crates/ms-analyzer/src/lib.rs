//! `ms-analyzer` — iteration lifecycle, the modal-split trip analyzer and
//! the link-leave counter.
//!
//! # Iteration loop
//!
//! ```text
//! for iteration in first..=last:
//!   ① on_iteration_start — TripAnalyzer attaches a TripReconstructor and
//!                          LinkLeaveAnalyzer its counter when this is the
//!                          last iteration.
//!   ② events             — read only when a listener is attached; every
//!                          event goes to both analyzers.
//!   ③ on_iteration_end   — the trip analyzer aggregates the trips of
//!                          agents living in the study region and writes
//!                          ITERS/it.<n>/modal-share.csv and
//!                          ITERS/it.<n>/modal-distance-share.csv; the
//!                          link analyzer writes
//!                          ITERS/it.<n>/link-leave-counts.csv.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Aggregates trips on Rayon's thread pool.               |
//! | `fx-hash`  | FxHash for the per-agent trip map.                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ms_analyzer::{run_analysis, AnalysisConfig};
//!
//! let config = AnalysisConfig::load(Path::new("analysis.toml"))?;
//! let report = run_analysis(&config)?;
//! println!("{} eligible trips", report.trips.aggregate.eligible_trips());
//! ```

pub mod analyzer;
pub mod config;
pub mod controler;
pub mod error;
pub mod links;
pub mod listener;
pub mod population;
pub mod run;
pub mod source;

#[cfg(test)]
mod tests;

pub use analyzer::{IterationReport, OutputDirectory, TripAnalyzer};
pub use config::AnalysisConfig;
pub use controler::{Controler, ControlerConfig};
pub use error::{AnalyzerError, AnalyzerResult};
pub use links::{LinkLeaveAnalyzer, LinkLeaveCounter, LinkLeaveReport};
pub use listener::{Chain, IterationContext, IterationListener, NoopListener};
pub use population::{load_population_csv, read_population, HomeInRegion, Population};
pub use run::{run_analysis, AnalysisReport};
pub use source::{EventFile, EventSource, EventStream};
