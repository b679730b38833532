//! Backing-medium transports for the registry table.
//!
//! # Responsibility
//! - Define the raw read-all/append-one contract every medium implements.
//! - Keep file and network transport details out of the store layer.
//!
//! # Invariants
//! - Media return raw cell text; typing and schema checks happen in the
//!   store boundary above.
//! - `append_row` performs a single medium-level append call, never a
//!   read-modify-write of existing rows.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod csv_file;
pub mod memory;
mod open;
pub mod sheets;

pub use csv_file::CsvMedium;
pub use memory::MemoryMedium;
pub use open::open_medium;
pub use sheets::SheetsMedium;

/// Canonical name of the id column.
pub const COLUMN_ID: &str = "ID";
/// Canonical name of the gift-name column.
pub const COLUMN_ITEM: &str = "Item";
/// Canonical name of the category column.
pub const COLUMN_CATEGORY: &str = "Categoria";
/// Canonical name of the status column.
pub const COLUMN_STATUS: &str = "Status";

/// Header row every medium stores, in canonical write order.
pub const EXPECTED_COLUMNS: [&str; 4] = [COLUMN_ID, COLUMN_ITEM, COLUMN_CATEGORY, COLUMN_STATUS];

pub type MediumResult<T> = Result<T, MediumError>;

/// One raw row of cells, header or data.
pub type RawRow = Vec<String>;

/// Full raw table as read from a medium.
///
/// An empty table (no header, no rows) is the canonical shape for a missing
/// or never-written medium.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    pub header: RawRow,
    pub rows: Vec<RawRow>,
}

impl RowTable {
    /// Returns whether the medium has never stored anything.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Transport-level medium error.
#[derive(Debug)]
pub enum MediumError {
    /// Local file cannot be read or written.
    Io { path: PathBuf, source: io::Error },
    /// Remote request could not be sent or completed.
    Request(reqwest::Error),
    /// Remote endpoint answered with a non-success status.
    RemoteStatus { status: u16, body: String },
    /// Stored payload cannot be decoded into a raw table.
    Decode(String),
}

impl Display for MediumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access registry file `{}`: {source}", path.display())
            }
            Self::Request(err) => write!(f, "registry worksheet request failed: {err}"),
            Self::RemoteStatus { status, body } => {
                write!(f, "registry worksheet returned HTTP {status}: {body}")
            }
            Self::Decode(message) => write!(f, "registry table is malformed: {message}"),
        }
    }
}

impl Error for MediumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Request(err) => Some(err),
            Self::RemoteStatus { .. } => None,
            Self::Decode(_) => None,
        }
    }
}

/// Raw transport contract consumed by the registry store.
pub trait RowMedium {
    /// Stable short name used in logging events.
    fn kind(&self) -> &'static str;

    /// Reads the whole backing table.
    ///
    /// A missing or never-written medium yields an empty table, not an
    /// error.
    fn read_all_rows(&self) -> MediumResult<RowTable>;

    /// Appends exactly one row in a single medium-level call.
    fn append_row(&mut self, row: &RawRow) -> MediumResult<()>;
}

impl<M: RowMedium + ?Sized> RowMedium for Box<M> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn read_all_rows(&self) -> MediumResult<RowTable> {
        (**self).read_all_rows()
    }

    fn append_row(&mut self, row: &RawRow) -> MediumResult<()> {
        (**self).append_row(row)
    }
}
