//! CSV report backend.
//!
//! Writes semicolon-separated files into the configured directory:
//!
//! | File                       | Header                                 |
//! |----------------------------|----------------------------------------|
//! | `modal-share.csv`          | `mode;count;share`                     |
//! | `modal-distance-share.csv` | `distance;mode;value;shareOfDistance`  |
//! | `link-leave-counts.csv`    | `link;count;freespeed`                 |
//!
//! Existing files are truncated.  An unknown free speed is an empty cell.

use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use crate::writer::ReportWriter;
use crate::{LinkLeaveRow, ModalDistanceShareRow, ModalShareRow, OutputError, OutputResult};

pub const MODAL_SHARE_FILE: &str = "modal-share.csv";
pub const MODAL_DISTANCE_SHARE_FILE: &str = "modal-distance-share.csv";
pub const LINK_LEAVE_COUNTS_FILE: &str = "link-leave-counts.csv";

const DELIMITER: u8 = b';';

/// Writes reports as CSV files in one directory.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    dir: PathBuf,
}

impl CsvReportWriter {
    /// A writer targeting `dir`, which is created if missing.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn modal_share_path(&self) -> PathBuf {
        self.dir.join(MODAL_SHARE_FILE)
    }

    pub fn modal_distance_share_path(&self) -> PathBuf {
        self.dir.join(MODAL_DISTANCE_SHARE_FILE)
    }

    pub fn link_leave_counts_path(&self) -> PathBuf {
        self.dir.join(LINK_LEAVE_COUNTS_FILE)
    }

    fn write_file<F>(path: PathBuf, body: F) -> OutputResult<()>
    where
        F: FnOnce(&mut Writer<std::fs::File>) -> OutputResult<()>,
    {
        let result = WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(&path)
            .map_err(OutputError::from)
            .and_then(|mut w| {
                body(&mut w)?;
                w.flush()?;
                Ok(())
            });
        match result {
            Ok(()) => {
                log::info!("wrote {}", path.display());
                Ok(())
            }
            Err(e) => Err(OutputError::Report { path, source: Box::new(e) }),
        }
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_modal_share(&mut self, rows: &[ModalShareRow]) -> OutputResult<()> {
        Self::write_file(self.modal_share_path(), |w| {
            w.write_record(["mode", "count", "share"])?;
            for row in rows {
                w.write_record(&[
                    row.mode.to_string(),
                    row.count.to_string(),
                    row.share.to_string(),
                ])?;
            }
            Ok(())
        })
    }

    fn write_modal_distance_share(&mut self, rows: &[ModalDistanceShareRow]) -> OutputResult<()> {
        Self::write_file(self.modal_distance_share_path(), |w| {
            w.write_record(["distance", "mode", "value", "shareOfDistance"])?;
            for row in rows {
                w.write_record(&[
                    row.distance.to_string(),
                    row.mode.to_string(),
                    row.value.to_string(),
                    row.share_of_distance.to_string(),
                ])?;
            }
            Ok(())
        })
    }

    fn write_link_leave_counts(&mut self, rows: &[LinkLeaveRow]) -> OutputResult<()> {
        Self::write_file(self.link_leave_counts_path(), |w| {
            w.write_record(["link", "count", "freespeed"])?;
            for row in rows {
                w.write_record(&[
                    row.link.to_string(),
                    row.leaves.to_string(),
                    row.freespeed.map(|v| v.to_string()).unwrap_or_default(),
                ])?;
            }
            Ok(())
        })
    }
}
