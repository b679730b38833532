//! In-process medium for tests and ephemeral hosts.

use crate::medium::{MediumResult, RawRow, RowMedium, RowTable, EXPECTED_COLUMNS};

/// Registry table held entirely in memory.
///
/// Mirrors the file medium's bootstrap behavior: the first append writes the
/// canonical header before the row.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    table: RowTable,
}

impl MemoryMedium {
    /// Creates a medium that has never stored anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium seeded with an arbitrary raw table.
    pub fn from_table(table: RowTable) -> Self {
        Self { table }
    }

    /// Read access to the raw table, for host inspection.
    pub fn table(&self) -> &RowTable {
        &self.table
    }
}

impl RowMedium for MemoryMedium {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn read_all_rows(&self) -> MediumResult<RowTable> {
        Ok(self.table.clone())
    }

    fn append_row(&mut self, row: &RawRow) -> MediumResult<()> {
        if self.table.is_empty() {
            self.table.header = EXPECTED_COLUMNS.iter().map(|name| name.to_string()).collect();
        }
        self.table.rows.push(row.clone());
        Ok(())
    }
}
