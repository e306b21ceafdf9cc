//! CSV persistence for the calculation history
//!
//! Layout: a header row `operation,operand_a,operand_b,result` followed by
//! one row per entry. `operand_b` is left empty for unary operations.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{HistoryEntry, HistoryError};

/// Column set of the history file, in order
pub const HEADER: [&str; 4] = ["operation", "operand_a", "operand_b", "result"];

/// Write `entries` to `path`.
///
/// The rows go to a temporary sibling first and are renamed into place, so
/// a failed write never leaves a truncated history behind.
pub(crate) fn write_entries(path: &Path, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
    let tmp = temp_path(path);
    let io_err = |source: std::io::Error| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(&tmp).map_err(io_err)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    let written = write_rows(&mut writer, entries).and_then(|_| {
        let mut inner = writer.into_inner().map_err(|e| e.into_error())?;
        inner.flush()
    });

    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        io_err(source)
    })
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, entries: &[HistoryEntry]) -> std::io::Result<()> {
    writer.write_record(HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    Ok(())
}

/// Read every entry from `path`.
///
/// A missing file is [`HistoryError::NotFound`]; a zero-byte file, a header
/// that isn't exactly [`HEADER`] or a malformed row is [`HistoryError::Format`].
pub(crate) fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>, HistoryError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => HistoryError::NotFound(path.to_path_buf()),
        _ => HistoryError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let len = file
        .metadata()
        .map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if len == 0 {
        return Err(HistoryError::Format(format!(
            "{} is empty (expected header: {})",
            path.display(),
            HEADER.join(",")
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    let found: Vec<&str> = headers.iter().collect();
    if found != HEADER {
        return Err(HistoryError::Format(format!(
            "{} has columns [{}], expected [{}]",
            path.display(),
            found.join(","),
            HEADER.join(",")
        )));
    }

    let mut entries = Vec::new();
    for row in reader.deserialize::<HistoryEntry>() {
        entries.push(row.map_err(|e| csv_error(path, e))?);
    }
    Ok(entries)
}

fn csv_error(path: &Path, err: csv::Error) -> HistoryError {
    if err.is_io_error() {
        return HistoryError::Io {
            path: path.to_path_buf(),
            source: err.into(),
        };
    }
    let line = err
        .position()
        .map(|p| format!(" (line {})", p.line()))
        .unwrap_or_default();
    HistoryError::Format(format!("{}{}: {}", path.display(), line, err))
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "history.csv".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
