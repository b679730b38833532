//! Flat-file CSV medium.
//!
//! # Responsibility
//! - Persist the registry table as one comma-separated file with a fixed
//!   header line.
//! - Bootstrap the header on the first append so a fresh path becomes a
//!   valid table.
//!
//! # Invariants
//! - Fields containing commas or quotes round-trip through doubled-quote
//!   encoding.
//! - Appends land as whole lines: a file missing its trailing newline is
//!   repaired before the new row is written.
//! - Every append ends with an fsync so a crash cannot truncate a row that
//!   was reported as stored.

use crate::medium::{MediumError, MediumResult, RawRow, RowMedium, RowTable, EXPECTED_COLUMNS};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Registry table stored as a local CSV file.
#[derive(Debug, Clone)]
pub struct CsvMedium {
    path: PathBuf,
}

impl CsvMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> MediumError {
        MediumError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Returns whether the existing file ends mid-line.
    ///
    /// Only called when the file is known to be non-empty.
    fn ends_without_newline(&self) -> MediumResult<bool> {
        let mut file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.seek(SeekFrom::End(-1))
            .map_err(|source| self.io_error(source))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)
            .map_err(|source| self.io_error(source))?;
        Ok(last[0] != b'\n')
    }
}

impl RowMedium for CsvMedium {
    fn kind(&self) -> &'static str {
        "csv"
    }

    fn read_all_rows(&self) -> MediumResult<RowTable> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(RowTable::default()),
            Err(err) => return Err(self.io_error(err)),
        };
        parse_table(&raw)
    }

    fn append_row(&mut self, row: &RawRow) -> MediumResult<()> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(self.io_error(err)),
        };

        let mut payload = String::new();
        if needs_header {
            payload.push_str(&encode_row(&EXPECTED_COLUMNS));
            payload.push('\n');
            info!(
                "event=csv_bootstrap module=medium path={} status=ok",
                self.path.display()
            );
        } else if self.ends_without_newline()? {
            payload.push('\n');
        }
        payload.push_str(&encode_row(row));
        payload.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(payload.as_bytes())
            .map_err(|source| self.io_error(source))?;
        file.sync_all().map_err(|source| self.io_error(source))?;
        Ok(())
    }
}

/// Parses a whole CSV document into header plus data rows.
///
/// Blank lines are skipped; the first non-blank line is the header.
fn parse_table(raw: &str) -> MediumResult<RowTable> {
    let mut table = RowTable::default();
    let mut saw_header = false;
    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_line(line)
            .map_err(|message| MediumError::Decode(format!("line {}: {message}", index + 1)))?;
        if saw_header {
            table.rows.push(cells);
        } else {
            table.header = cells;
            saw_header = true;
        }
    }
    Ok(table)
}

fn needs_quoting(field: &str) -> bool {
    field.contains(',') || field.contains('"')
}

/// Encodes one row as a comma-separated line with doubled-quote escaping.
fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        let field = field.as_ref();
        if needs_quoting(field) {
            line.push('"');
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(field);
        }
    }
    line
}

/// Splits one line into cells, honoring quoted fields.
fn split_line(line: &str) -> Result<RawRow, String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => cells.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    cells.push(current);
    Ok(cells)
}
