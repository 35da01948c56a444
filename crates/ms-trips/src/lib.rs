//! `ms-trips` — per-agent trip reconstruction.
//!
//! A **trip** runs from the end of one real activity to the start of the
//! next.  Interaction activities (mode-change markers such as
//! `"car interaction"`) split legs, not trips, so a walk–car–walk chain
//! between home and work is one trip whose main mode is `car`.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                 |
//! |-------------------|----------------------------------------------------------|
//! | [`trip`]          | `TripRecord`, `AgentTrips`                               |
//! | [`store`]         | `TripStore`, `AgentMap<V>` (FxHash under `fx-hash`)      |
//! | [`reconstructor`] | `TripReconstructor` event handler, `ReconstructionStats` |
//! | [`error`]         | `TripError`, `TripResult<T>`                             |

pub mod error;
pub mod reconstructor;
pub mod store;
pub mod trip;


pub use error::{TripError, TripResult};
pub use reconstructor::{ReconstructionStats, TripReconstructor};
pub use store::{AgentMap, TripStore};
pub use trip::{AgentTrips, TripRecord};
