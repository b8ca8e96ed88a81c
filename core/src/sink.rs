//! CSV output sink.
//!
//! Rows are written to `<output>.tmp` and renamed over the target once
//! the writer has flushed, so a failed run never leaves a half-written
//! file at the output path.

use crate::{
    error::GenResult,
    record::{SubscriptionRecord, COLUMNS},
};
use csv::WriterBuilder;
use log::{debug, info};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkMetrics {
    pub rows_written: u64,
    pub file_size_bytes: u64,
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write the header and every record to `output_path`, replacing any
/// existing file.
pub fn write_records<P: AsRef<Path>>(
    output_path: P,
    records: &[SubscriptionRecord],
) -> GenResult<SinkMetrics> {
    let output_path = output_path.as_ref();
    let tmp = temp_path(output_path);
    debug!("writing {} rows to {}", records.len(), tmp.display());

    let result = write_to(&tmp, records);
    let rows_written = match result {
        Ok(rows) => rows,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&tmp, output_path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    let metrics = SinkMetrics {
        rows_written,
        file_size_bytes: fs::metadata(output_path)?.len(),
    };
    info!(
        "wrote {} rows ({} bytes) to {}",
        metrics.rows_written,
        metrics.file_size_bytes,
        output_path.display()
    );
    Ok(metrics)
}

fn write_to(path: &Path, records: &[SubscriptionRecord]) -> GenResult<u64> {
    let file = File::create(path)?;
    let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    // Header is written by hand so an empty run still gets one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(buf_writer);

    writer.write_record(COLUMNS)?;
    let mut rows = 0u64;
    for record in records {
        writer.serialize(record)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
