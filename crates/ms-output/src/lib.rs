//! `ms-output` — trip aggregation, link-leave counts and report writers.
//!
//! Two reports are produced from the eligible trips of the selected
//! subpopulation, and a third from the link-leave events of the study area:
//!
//! | Report               | Rows                                                   |
//! |----------------------|--------------------------------------------------------|
//! | modal share          | one per observed mode: count and share of all trips    |
//! | modal distance share | mode × distance class: count and share within class    |
//! | link-leave counts    | one per counted link: leaves and free speed            |
//!
//! [`TripAggregate`] and [`LinkLeaveCounts`] do the counting, a
//! [`ReportWriter`] backend (only [`CsvReportWriter`] today) persists the
//! rows, and [`write_reports`] / [`write_link_leave_report`] tie them
//! together.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ms_output::{log_summary, write_reports, CsvReportWriter, TripAggregate};
//!
//! let aggregate = TripAggregate::from_store(reconstructor.store(), &filter);
//! log_summary(&aggregate);
//! let mut writer = CsvReportWriter::new(Path::new("./output/ITERS/it.0"))?;
//! for e in write_reports(&aggregate, &mut writer) {
//!     eprintln!("report error: {e}");
//! }
//! ```

pub mod aggregate;
pub mod csv;
pub mod error;
pub mod filter;
pub mod links;
pub mod report;
pub mod row;
pub mod writer;


pub use aggregate::TripAggregate;
pub use self::csv::{
    CsvReportWriter, LINK_LEAVE_COUNTS_FILE, MODAL_DISTANCE_SHARE_FILE, MODAL_SHARE_FILE,
};
pub use error::{OutputError, OutputResult};
pub use filter::{AcceptAll, AgentFilter};
pub use links::LinkLeaveCounts;
pub use report::{log_summary, write_link_leave_report, write_reports};
pub use row::{LinkLeaveRow, ModalDistanceShareRow, ModalShareRow};
pub use writer::ReportWriter;
