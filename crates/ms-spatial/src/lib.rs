//! `ms-spatial` — region membership and network link lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`region`]  | `SpatialFilter` (R-tree + covers test), `RegionFeature` loader  |
//! | [`network`] | `Network`, `NetworkBuilder`, `NetworkLookup` trait, CSV loader  |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                              |

pub mod error;
pub mod network;
pub mod region;


pub use error::{SpatialError, SpatialResult};
pub use network::{load_network_csv, load_network_reader, Link, Network, NetworkBuilder, NetworkLookup};
pub use region::{load_regions_csv, read_regions, RegionFeature, SpatialFilter};
