//! Iteration lifecycle hooks.

use ms_events::{Event, EventHandler};

use crate::{AnalyzerError, AnalyzerResult};

/// Which iteration is running, passed to every lifecycle hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IterationContext {
    pub iteration: u32,
    /// `true` for the final iteration of the run.
    pub is_last:   bool,
}

/// Callbacks invoked by [`Controler::run`][crate::Controler::run] around
/// each iteration.
///
/// A listener is also the iteration's event handler: between
/// `on_iteration_start` and `on_iteration_end` every event of the
/// iteration's stream is delivered to it, followed by `on_stream_end`.
/// A listener that answers `false` from [`wants_events`](Self::wants_events)
/// after `on_iteration_start` gets neither; the controler then never opens
/// the iteration's stream.  Both lifecycle hooks default to no-ops.
///
/// # Example — event counter
///
/// ```rust
/// use ms_analyzer::{AnalyzerError, IterationContext, IterationListener};
/// use ms_events::{Event, EventHandler};
///
/// #[derive(Default)]
/// struct CountEvents { seen: u64 }
///
/// impl EventHandler for CountEvents {
///     type Error = AnalyzerError;
///
///     fn handle_event(&mut self, _event: &Event) -> Result<(), AnalyzerError> {
///         self.seen += 1;
///         Ok(())
///     }
/// }
///
/// impl IterationListener for CountEvents {
///     fn on_iteration_start(&mut self, _ctx: IterationContext) -> Result<(), AnalyzerError> {
///         self.seen = 0;
///         Ok(())
///     }
/// }
/// ```
pub trait IterationListener: EventHandler<Error = AnalyzerError> {
    /// Called before the iteration's first event.
    fn on_iteration_start(&mut self, _ctx: IterationContext) -> AnalyzerResult<()> {
        Ok(())
    }

    /// Whether the current iteration's events are needed.  Asked once per
    /// iteration, right after `on_iteration_start`.
    fn wants_events(&self) -> bool {
        true
    }

    /// Called after the iteration's stream has been drained, or skipped.
    fn on_iteration_end(&mut self, _ctx: IterationContext) -> AnalyzerResult<()> {
        Ok(())
    }
}

// ── Chain ─────────────────────────────────────────────────────────────────────

/// Two listeners driven as one.  Every hook and event reaches `first`, then
/// `second`; the first error stops the pair.
pub struct Chain<A, B> {
    pub first:  A,
    pub second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: IterationListener, B: IterationListener> EventHandler for Chain<A, B> {
    type Error = AnalyzerError;

    fn handle_event(&mut self, event: &Event) -> AnalyzerResult<()> {
        self.first.handle_event(event)?;
        self.second.handle_event(event)
    }

    fn on_stream_end(&mut self) -> AnalyzerResult<()> {
        self.first.on_stream_end()?;
        self.second.on_stream_end()
    }
}

impl<A: IterationListener, B: IterationListener> IterationListener for Chain<A, B> {
    fn on_iteration_start(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        self.first.on_iteration_start(ctx)?;
        self.second.on_iteration_start(ctx)
    }

    fn wants_events(&self) -> bool {
        self.first.wants_events() || self.second.wants_events()
    }

    fn on_iteration_end(&mut self, ctx: IterationContext) -> AnalyzerResult<()> {
        self.first.on_iteration_end(ctx)?;
        self.second.on_iteration_end(ctx)
    }
}

/// An [`IterationListener`] that ignores everything.
pub struct NoopListener;

impl EventHandler for NoopListener {
    type Error = AnalyzerError;

    fn handle_event(&mut self, _event: &Event) -> AnalyzerResult<()> {
        Ok(())
    }
}

impl IterationListener for NoopListener {}
