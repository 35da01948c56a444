//! `ms-events` — simulation events, the handler trait, and event-file input.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`event`]     | `Event` union, `ActivityEvent`, interaction detection     |
//! | [`handler`]   | `EventHandler` trait, `process_events` dispatch loop      |
//! | [`reader`]    | `EventReader` (streaming CSV), `open_events` (+ gzip)     |
//! | [`error`]     | `EventError`, `EventResult<T>`                            |
//!
//! # Ordering contract
//!
//! The producer guarantees that events of any one agent arrive in
//! non-decreasing time order.  Nothing here checks or restores that order.

pub mod error;
pub mod event;
pub mod handler;
pub mod reader;

#[cfg(test)]
mod tests;

pub use error::{EventError, EventResult};
pub use event::{is_interaction, ActivityEvent, Event, INTERACTION_SUFFIX};
pub use handler::{process_events, EventHandler};
pub use reader::{open_events, EventReader};
