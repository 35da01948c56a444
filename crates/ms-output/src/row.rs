//! Plain data row types written by report backends.

use ms_core::{DistanceClass, LinkId, TransportMode};

/// One row of the modal-share report.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalShareRow {
    pub mode:  TransportMode,
    pub count: u64,
    /// `count / eligible trips`, a fraction in `[0, 1]`.
    pub share: f64,
}

/// One cell of the distance-bin × mode table.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalDistanceShareRow {
    pub distance:          DistanceClass,
    pub mode:              TransportMode,
    pub value:             u64,
    /// `value / eligible trips in this bin`; `0` for an empty bin.
    pub share_of_distance: f64,
}

/// Leave count of one link inside the study area.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLeaveRow {
    pub link:      LinkId,
    pub leaves:    u64,
    /// Free-flow speed in m/s; `None` when the network has none.
    pub freespeed: Option<f64>,
}
