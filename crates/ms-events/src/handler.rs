//! Event handler trait and the dispatch loop that drives it.

use crate::{Event, EventError, EventResult};

/// Consumer of an ordered event stream.
///
/// Events are delivered one at a time, in stream order, from a single
/// thread.  Handlers may keep per-agent state across calls but must not
/// expect any reordering or buffering from the dispatcher.
///
/// # Example — departure counter
///
/// ```rust
/// use ms_events::{Event, EventError, EventHandler};
///
/// struct CountDepartures(u64);
///
/// impl EventHandler for CountDepartures {
///     type Error = EventError;
///
///     fn handle_event(&mut self, event: &Event) -> Result<(), EventError> {
///         if matches!(event, Event::Departure { .. }) {
///             self.0 += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait EventHandler {
    /// Error type of the handler.  Stream read errors convert into it so a
    /// single `Result` covers both reading and handling.
    type Error: From<EventError>;

    fn handle_event(&mut self, event: &Event) -> Result<(), Self::Error>;

    /// Called once after the last event of the stream.
    fn on_stream_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Feed every event of `events` to `handler`, in order, then signal the end
/// of the stream.
///
/// Stops at the first read or handler error.  Returns the number of events
/// delivered.
pub fn process_events<H, I>(events: I, handler: &mut H) -> Result<u64, H::Error>
where
    H: EventHandler + ?Sized,
    I: IntoIterator<Item = EventResult<Event>>,
{
    let mut delivered = 0u64;
    for event in events {
        let event = event?;
        handler.handle_event(&event)?;
        delivered += 1;
    }
    handler.on_stream_end()?;
    Ok(delivered)
}
