//! The `ReportWriter` trait implemented by report backends.

use crate::{LinkLeaveRow, ModalDistanceShareRow, ModalShareRow, OutputResult};

/// Destination for the two modal-split reports and the link-leave report.
///
/// Each call writes one complete report, replacing any earlier output of
/// the same report.
pub trait ReportWriter {
    fn write_modal_share(&mut self, rows: &[ModalShareRow]) -> OutputResult<()>;

    fn write_modal_distance_share(&mut self, rows: &[ModalDistanceShareRow]) -> OutputResult<()>;

    fn write_link_leave_counts(&mut self, rows: &[LinkLeaveRow]) -> OutputResult<()>;
}
