//! JSON output for extracted products.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use shoedex_core::ProductRecord;

use crate::error::ScraperError;

/// Writes `records` to `path` as a pretty-printed (four-space) UTF-8 JSON
/// array, overwriting any existing file. Non-ASCII text is written as-is.
///
/// # Errors
///
/// - [`ScraperError::SinkWrite`] if the file cannot be created or written,
///   including I/O failures raised mid-serialization.
/// - [`ScraperError::SinkSerialize`] if serialization fails.
pub fn write_json(records: &[ProductRecord], path: &Path) -> Result<(), ScraperError> {
    let sink_err = |source: std::io::Error| ScraperError::SinkWrite {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(sink_err)?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer).map_err(|e| {
        if e.is_io() {
            sink_err(e.into())
        } else {
            ScraperError::SinkSerialize(e)
        }
    })?;
    writer.write_all(b"\n").map_err(sink_err)?;
    writer.flush().map_err(sink_err)?;

    tracing::info!(path = %path.display(), count = records.len(), "products written");
    Ok(())
}
