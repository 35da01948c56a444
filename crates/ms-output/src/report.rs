//! Report orchestration: diagnostic summaries and report writing.

use crate::{LinkLeaveCounts, OutputError, ReportWriter, TripAggregate};

/// Write both reports through `writer`.
///
/// A failing report does not stop the other one.  Every failure is logged
/// at error level and returned; an empty vector means both were written.
pub fn write_reports<W: ReportWriter + ?Sized>(
    aggregate: &TripAggregate,
    writer:    &mut W,
) -> Vec<OutputError> {
    let mut failures = Vec::new();

    if let Err(e) = writer.write_modal_share(&aggregate.modal_share_rows()) {
        log::error!("modal-share report: {e}");
        failures.push(e);
    }
    if let Err(e) = writer.write_modal_distance_share(&aggregate.modal_distance_share_rows()) {
        log::error!("modal-distance-share report: {e}");
        failures.push(e);
    }
    failures
}

/// Log eligible trips, participants and the per-mode breakdown.
pub fn log_summary(aggregate: &TripAggregate) {
    log::info!(
        "{} eligible trips by {} participating agents",
        aggregate.eligible_trips(),
        aggregate.participants(),
    );
    for row in aggregate.modal_share_rows() {
        log::info!("  {:<6} {:>8} trips  {:>6.2} %", row.mode, row.count, row.share * 100.0);
    }
}

/// Write the link-leave report through `writer`.  A failure is logged and
/// returned, like [`write_reports`].
pub fn write_link_leave_report<W: ReportWriter + ?Sized>(
    counts: &LinkLeaveCounts,
    writer: &mut W,
) -> Vec<OutputError> {
    match writer.write_link_leave_counts(&counts.rows()) {
        Ok(()) => Vec::new(),
        Err(e) => {
            log::error!("link-leave report: {e}");
            vec![e]
        }
    }
}
