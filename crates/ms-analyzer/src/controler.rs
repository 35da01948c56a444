//! The `Controler` and its iteration loop.

use ms_events::process_events;

use crate::{AnalyzerError, AnalyzerResult, EventSource, IterationContext, IterationListener};

/// Iteration range of a run, both ends inclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlerConfig {
    pub first_iteration: u32,
    pub last_iteration:  u32,
}

impl ControlerConfig {
    /// # Errors
    ///
    /// [`AnalyzerError::Config`] if `last_iteration < first_iteration`.
    pub fn validate(&self) -> AnalyzerResult<()> {
        if self.last_iteration < self.first_iteration {
            return Err(AnalyzerError::Config(format!(
                "last_iteration {} is before first_iteration {}",
                self.last_iteration, self.first_iteration,
            )));
        }
        Ok(())
    }
}

/// Drives the iteration loop:
///
/// ```text
/// for iteration in first..=last:
///   listener.on_iteration_start(ctx)
///   if listener.wants_events():
///     every event of source.events(iteration) → listener
///     listener.on_stream_end()
///   listener.on_iteration_end(ctx)
/// ```
///
/// Any error from the source or the listener ends the run.
pub struct Controler<S: EventSource> {
    config: ControlerConfig,
    source: S,
}

impl<S: EventSource> Controler<S> {
    /// # Errors
    ///
    /// [`AnalyzerError::Config`] if `last_iteration < first_iteration`.
    pub fn new(config: ControlerConfig, source: S) -> AnalyzerResult<Self> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &ControlerConfig {
        &self.config
    }

    /// Run every iteration, delivering lifecycle callbacks and events to
    /// `listener`.
    pub fn run<L: IterationListener + ?Sized>(&mut self, listener: &mut L) -> AnalyzerResult<()> {
        let ControlerConfig { first_iteration, last_iteration } = self.config;
        for iteration in first_iteration..=last_iteration {
            let ctx = IterationContext { iteration, is_last: iteration == last_iteration };
            log::info!("iteration {iteration} starting");

            listener.on_iteration_start(ctx)?;
            if listener.wants_events() {
                let delivered = process_events(self.source.events(iteration)?, listener)?;
                log::debug!("iteration {iteration}: {delivered} events delivered");
            } else {
                log::debug!("iteration {iteration}: no listener attached, events skipped");
            }
            listener.on_iteration_end(ctx)?;
        }
        Ok(())
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
