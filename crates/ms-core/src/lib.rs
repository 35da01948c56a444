//! `ms-core` — foundational types for the modal-split analysis workspace.
//!
//! This crate is a dependency of every other `ms-*` crate.  It intentionally
//! has no `ms-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `LinkId`                                   |
//! | [`geo`]         | `Coord`, Euclidean distance                           |
//! | [`transport`]   | `TransportMode`, main-mode precedence                 |
//! | [`distance`]    | `DistanceClass` bins                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod distance;
pub mod geo;
pub mod ids;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distance::DistanceClass;
pub use geo::Coord;
pub use ids::{AgentId, LinkId};
pub use transport::TransportMode;
