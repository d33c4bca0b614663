//! Single-member zip archive construction for export file materialization.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::ExportError;

pub fn zip_single_file(member_name: &str, contents: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer
        .start_file(member_name, options)
        .map_err(|e| ExportError::Materialization(e.to_string()))?;
    writer.write_all(contents).map_err(|e| ExportError::Materialization(e.to_string()))?;

    let cursor = writer.finish().map_err(|e| ExportError::Materialization(e.to_string()))?;
    Ok(cursor.into_inner())
}
