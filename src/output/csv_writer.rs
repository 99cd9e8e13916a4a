//! CSV serialization of listing records

use crate::output::ListingRecord;
use crate::WriteError;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Column order of the output file
pub const HEADER: [&str; 8] = [
    "url",
    "address",
    "lot_size",
    "price",
    "price_per_sqft",
    "days_on_market",
    "scrape_timestamp",
    "error",
];

/// How to treat an existing output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and write a fresh header
    Create,
    /// Add rows after an existing header; behaves like `Create` if the file is missing
    Append,
}

/// Writes listing records to one CSV destination
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
    mode: WriteMode,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes every record, returning how many rows were written
    ///
    /// An empty slice writes nothing and leaves the destination untouched.
    pub fn write(&self, records: &[ListingRecord]) -> Result<usize, WriteError> {
        if records.is_empty() {
            return Ok(0);
        }

        let (file, write_header) = match self.mode {
            WriteMode::Append if self.path.exists() => self.open_for_append()?,
            _ => (File::create(&self.path).map_err(|e| self.io_error(e))?, true),
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for record in records {
            writer.serialize(record).map_err(|e| self.csv_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!(
            "Wrote {} record(s) to {} ({:?})",
            records.len(),
            self.path.display(),
            self.mode
        );
        Ok(records.len())
    }

    /// Checks that a later [`write`](Self::write) can succeed, without changing the destination
    ///
    /// In append mode an existing file must carry the expected header. The
    /// destination must be openable for writing; an existing file is never
    /// truncated here, and a file created only to test the path is removed.
    pub fn preflight(&self) -> Result<(), WriteError> {
        if self.path.exists() {
            if self.mode == WriteMode::Append {
                self.needs_header()?;
            }
            OpenOptions::new()
                .append(true)
                .open(&self.path)
                .map_err(|e| self.io_error(e))?;
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path)
                .map_err(|e| self.io_error(e))?;
            std::fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
        }

        tracing::debug!("Output destination {} is writable", self.path.display());
        Ok(())
    }

    /// Inspects an existing file's first row; true if the file is empty
    fn needs_header(&self) -> Result<bool, WriteError> {
        match read_header(&self.path).map_err(|e| self.csv_error(e))? {
            None => Ok(true),
            Some(found) if found == HEADER => Ok(false),
            Some(found) => Err(WriteError::HeaderMismatch {
                path: self.path.display().to_string(),
                found: found.join(","),
            }),
        }
    }

    /// Opens an existing file for appending and decides whether it needs a header
    fn open_for_append(&self) -> Result<(File, bool), WriteError> {
        let needs_header = self.needs_header()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        if !needs_header && !ends_with_newline(&mut file).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }
        Ok((file, needs_header))
    }

    fn io_error(&self, source: std::io::Error) -> WriteError {
        WriteError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> WriteError {
        WriteError::Csv {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Reads the first row of an existing CSV file, or `None` if it is empty
fn read_header(path: &Path) -> Result<Option<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    match reader.records().next() {
        Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
        None => Ok(None),
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
