//! Registry store over a pluggable backing medium.
//!
//! # Responsibility
//! - Expose the list/add contract the host page consumes.
//! - Validate submissions before any write and decode typed records on read.
//! - Keep the listing cache coherent with writes made through this store.
//!
//! # Invariants
//! - `add_gift` performs exactly one blind append; it never reads existing
//!   rows first and never rewrites them.
//! - Every successful append clears the listing cache, so the next listing
//!   reflects the write.
//! - Rows are appended in the canonical `ID,Item,Categoria,Status` order
//!   without reading the header first, so reads accept only headers that
//!   start with those columns; extra trailing columns are tolerated.
//! - Log lines carry ids, counts and durations only, never gift text.

use crate::medium::{MediumError, RawRow, RowMedium, RowTable, COLUMN_ID, EXPECTED_COLUMNS};
use crate::model::gift::{
    parse_gift_category, parse_gift_status, GiftCategory, GiftRecord, GiftValidationError,
};
use crate::store::cache::{ListingCache, DEFAULT_CACHE_TTL};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store boundary error.
///
/// Every variant is recoverable: hosts surface the message and keep serving.
#[derive(Debug)]
pub enum StoreError {
    /// The backing medium could not be reached, read or written.
    Unavailable(MediumError),
    /// The backing table is non-empty but its header does not start with
    /// the expected columns.
    SchemaMismatch { missing: Vec<&'static str> },
    /// The submission was rejected before any write happened.
    Validation(GiftValidationError),
    /// A persisted data row is structurally broken (1-based row index).
    InvalidRow { row: usize, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "registry medium is unavailable: {err}"),
            Self::SchemaMismatch { missing } => {
                write!(
                    f,
                    "registry table header must start with `{}`; missing: {}",
                    EXPECTED_COLUMNS.join(","),
                    missing.join(", ")
                )
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidRow { row, message } => {
                write!(f, "registry row {row} is invalid: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::SchemaMismatch { .. } | Self::InvalidRow { .. } => None,
        }
    }
}

impl From<MediumError> for StoreError {
    fn from(err: MediumError) -> Self {
        Self::Unavailable(err)
    }
}

impl From<GiftValidationError> for StoreError {
    fn from(err: GiftValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Gift-registry store: typed list/add operations over one raw medium.
pub struct GiftRegistryStore<M: RowMedium> {
    medium: M,
    cache: ListingCache,
}

impl<M: RowMedium> GiftRegistryStore<M> {
    /// Creates a store with the default listing-cache TTL.
    pub fn new(medium: M) -> Self {
        Self::with_cache_ttl(medium, DEFAULT_CACHE_TTL)
    }

    /// Creates a store with an explicit cache TTL.
    ///
    /// `Duration::ZERO` disables listing caching.
    pub fn with_cache_ttl(medium: M, ttl: Duration) -> Self {
        Self {
            medium,
            cache: ListingCache::new(ttl),
        }
    }

    /// Read access to the backing medium, for host inspection.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Returns all claimed gifts in append order.
    ///
    /// An empty or never-written medium yields an empty listing. Rows whose
    /// status is not a claim marker are skipped; structurally broken rows
    /// fail the whole listing.
    pub fn list_gifts(&mut self) -> StoreResult<Vec<GiftRecord>> {
        let started_at = Instant::now();
        if let Some(records) = self.cache.get() {
            debug!(
                "event=gift_list module=store status=ok source=cache count={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            );
            return Ok(records.to_vec());
        }

        let table = match self.medium.read_all_rows() {
            Ok(table) => table,
            Err(err) => {
                error!(
                    "event=gift_list module=store status=error medium={} duration_ms={} error={err}",
                    self.medium.kind(),
                    started_at.elapsed().as_millis()
                );
                return Err(StoreError::Unavailable(err));
            }
        };
        let records = match decode_claimed_records(&table) {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=gift_list module=store status=error medium={} duration_ms={} error={err}",
                    self.medium.kind(),
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
        };

        self.cache.put(records.clone());
        info!(
            "event=gift_list module=store status=ok source=medium medium={} count={} duration_ms={}",
            self.medium.kind(),
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Validates a submission, appends it and returns the stored record.
    ///
    /// The returned record is the one that was written; no read-back happens,
    /// so a stale cache can never leak into the result. Validation failures
    /// never reach the medium.
    pub fn add_gift(
        &mut self,
        item: impl Into<String>,
        category: GiftCategory,
    ) -> StoreResult<GiftRecord> {
        let started_at = Instant::now();
        let record = GiftRecord::new(item, category)?;
        let row = encode_record_row(&record);

        if let Err(err) = self.medium.append_row(&row) {
            error!(
                "event=gift_add module=store status=error medium={} duration_ms={} error={err}",
                self.medium.kind(),
                started_at.elapsed().as_millis()
            );
            return Err(StoreError::Unavailable(err));
        }
        self.cache.clear();

        info!(
            "event=gift_add module=store status=ok medium={} id={} category={} duration_ms={}",
            self.medium.kind(),
            record.id,
            record.category.as_str(),
            started_at.elapsed().as_millis()
        );
        Ok(record)
    }

    /// Drops any cached listing so the next read hits the medium.
    ///
    /// Hosts call this after out-of-band writes; writes through this store
    /// already invalidate.
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
    }
}

/// Cell positions fixed by the canonical column order.
const ID_CELL: usize = 0;
const ITEM_CELL: usize = 1;
const CATEGORY_CELL: usize = 2;
const STATUS_CELL: usize = 3;

/// Checks that the header starts with the canonical columns.
///
/// Appends write cells in canonical order without reading the header first,
/// so reads accept only layouts such appends keep aligned: the expected
/// columns as a prefix, extra trailing columns tolerated. A reordered header
/// would take appended cells into the wrong columns, so it is reported here
/// instead of silently misreading rows. `missing` names every expected
/// column whose canonical slot does not hold it.
fn check_header(header: &[String]) -> StoreResult<()> {
    let mut missing = Vec::new();
    for (slot, name) in EXPECTED_COLUMNS.iter().copied().enumerate() {
        if header.get(slot).map(|cell| cell.trim()) != Some(name) {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::SchemaMismatch { missing })
    }
}

/// Reads one cell, treating rows shortened by trailing empty cells as empty.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Decodes the raw table into typed claimed records, in table order.
fn decode_claimed_records(table: &RowTable) -> StoreResult<Vec<GiftRecord>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    check_header(&table.header)?;

    let mut records = Vec::new();
    for (offset, row) in table.rows.iter().enumerate() {
        let row_number = offset + 1;

        let status_cell = cell(row, STATUS_CELL);
        if parse_gift_status(status_cell).is_none() {
            debug!("event=gift_row_skip module=store row={row_number}");
            continue;
        }

        let id_cell = cell(row, ID_CELL).trim();
        let id = Uuid::parse_str(id_cell).map_err(|_| StoreError::InvalidRow {
            row: row_number,
            message: format!("`{COLUMN_ID}` cell `{id_cell}` is not a uuid"),
        })?;
        let category =
            parse_gift_category(cell(row, CATEGORY_CELL)).map_err(|err| {
                StoreError::InvalidRow {
                    row: row_number,
                    message: err.to_string(),
                }
            })?;
        let record = GiftRecord::with_id(id, cell(row, ITEM_CELL), category).map_err(|err| {
            StoreError::InvalidRow {
                row: row_number,
                message: err.to_string(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Encodes one record as a raw row in canonical column order.
fn encode_record_row(record: &GiftRecord) -> RawRow {
    vec![
        record.id.to_string(),
        record.item.clone(),
        record.category.as_str().to_string(),
        record.status.as_str().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gift::GiftStatus;

    fn header() -> RawRow {
        vec![
            "ID".to_string(),
            "Item".to_string(),
            "Categoria".to_string(),
            "Status".to_string(),
        ]
    }

    fn claimed_row(id: &str, item: &str, category: &str) -> RawRow {
        vec![
            id.to_string(),
            item.to_string(),
            category.to_string(),
            "claimed".to_string(),
        ]
    }

    #[test]
    fn check_header_accepts_canonical_prefix_with_extras() {
        assert!(check_header(&header()).is_ok());

        let mut extended = header();
        extended.push("Loja".to_string());
        assert!(check_header(&extended).is_ok());

        let padded: RawRow = header().iter().map(|name| format!(" {name} ")).collect();
        assert!(check_header(&padded).is_ok());
    }

    #[test]
    fn check_header_rejects_reordered_columns() {
        let reordered = vec![
            "Status".to_string(),
            "Item".to_string(),
            "ID".to_string(),
            "Categoria".to_string(),
        ];
        match check_header(&reordered) {
            Err(StoreError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["ID", "Categoria", "Status"]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn check_header_reports_every_missing_name() {
        let header = vec!["ID".to_string(), "Item".to_string()];
        match check_header(&header) {
            Err(StoreError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["Categoria", "Status"]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn decode_skips_rows_without_claim_status() {
        let id = Uuid::new_v4().to_string();
        let mut pending = claimed_row(&Uuid::new_v4().to_string(), "Jogo de toalhas", "Enxoval");
        pending[3] = "reservado".to_string();
        let table = RowTable {
            header: header(),
            rows: vec![pending, claimed_row(&id, "Panela", "Cozinha")],
        };
        let records = decode_claimed_records(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.to_string(), id);
        assert_eq!(records[0].status, GiftStatus::Claimed);
    }

    #[test]
    fn decode_treats_short_row_as_trailing_empty_cells() {
        // A row cut after the category column has an empty status, which
        // reads as not claimed rather than as a broken row.
        let short = vec![
            Uuid::new_v4().to_string(),
            "Panela".to_string(),
            "Cozinha".to_string(),
        ];
        let table = RowTable {
            header: header(),
            rows: vec![short],
        };
        assert!(decode_claimed_records(&table).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_uuid_id() {
        let table = RowTable {
            header: header(),
            rows: vec![claimed_row("not-a-uuid", "Panela", "Cozinha")],
        };
        match decode_claimed_records(&table) {
            Err(StoreError::InvalidRow { row, message }) => {
                assert_eq!(row, 1);
                assert!(message.contains("not-a-uuid"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_unknown_category() {
        let table = RowTable {
            header: header(),
            rows: vec![claimed_row(
                &Uuid::new_v4().to_string(),
                "Panela",
                "Ferramentas",
            )],
        };
        assert!(matches!(
            decode_claimed_records(&table),
            Err(StoreError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn decode_of_empty_table_is_empty() {
        assert!(decode_claimed_records(&RowTable::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn encoded_row_follows_canonical_column_order() {
        let record = GiftRecord::new("Panela", GiftCategory::Cozinha).unwrap();
        let row = encode_record_row(&record);
        assert_eq!(row.len(), 4);
        assert_eq!(row[0], record.id.to_string());
        assert_eq!(row[1], "Panela");
        assert_eq!(row[2], "Cozinha");
        assert_eq!(row[3], "claimed");
    }
}
