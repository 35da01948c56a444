use ms_core::LinkId;
use ms_events::EventError;
use ms_output::OutputError;
use ms_spatial::SpatialError;
use ms_trips::TripError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analysis configuration error: {0}")]
    Config(String),

    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("population file error: {0}")]
    Population(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spatial input error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("event stream error: {0}")]
    Event(#[from] EventError),

    #[error("link {link} left at t={time} is not in the network")]
    UnknownLink { link: LinkId, time: f64 },

    #[error("trip reconstruction failed: {0}")]
    Trip(#[from] TripError),

    #[error("report output error: {0}")]
    Output(#[from] OutputError),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
