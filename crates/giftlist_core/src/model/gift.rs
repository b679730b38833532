//! Gift-claim domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted for every claimed gift.
//! - Validate submission input before anything reaches a backing medium.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another record.
//! - `item` is trimmed, non-empty and single-line.
//! - `Claimed` is the only status this system ever writes.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one gift-claim record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GiftId = Uuid;

/// Fixed category set offered by the registry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftCategory {
    #[serde(rename = "Eletrônicos")]
    Eletronicos,
    #[serde(rename = "Eletrodomésticos")]
    Eletrodomesticos,
    #[serde(rename = "Utensílios Domésticos")]
    UtensiliosDomesticos,
    #[serde(rename = "Cozinha")]
    Cozinha,
    #[serde(rename = "Móveis")]
    Moveis,
    #[serde(rename = "Decoração")]
    Decoracao,
    #[serde(rename = "Vale-Presente")]
    ValePresente,
    #[serde(rename = "Enxoval")]
    Enxoval,
    #[serde(rename = "Outros")]
    Outros,
}

impl GiftCategory {
    /// Canonical wire name stored in the `Categoria` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eletronicos => "Eletrônicos",
            Self::Eletrodomesticos => "Eletrodomésticos",
            Self::UtensiliosDomesticos => "Utensílios Domésticos",
            Self::Cozinha => "Cozinha",
            Self::Moveis => "Móveis",
            Self::Decoracao => "Decoração",
            Self::ValePresente => "Vale-Presente",
            Self::Enxoval => "Enxoval",
            Self::Outros => "Outros",
        }
    }
}

const SUPPORTED_CATEGORY_NAMES: &[&str] = &[
    "Eletrônicos",
    "Eletrodomésticos",
    "Utensílios Domésticos",
    "Cozinha",
    "Móveis",
    "Decoração",
    "Vale-Presente",
    "Enxoval",
    "Outros",
];

/// Returns every canonical category wire name, in form display order.
pub fn supported_category_names() -> &'static [&'static str] {
    SUPPORTED_CATEGORY_NAMES
}

/// Parses one category from its canonical wire name.
pub fn parse_gift_category(value: &str) -> Result<GiftCategory, GiftValidationError> {
    match value.trim() {
        "Eletrônicos" => Ok(GiftCategory::Eletronicos),
        "Eletrodomésticos" => Ok(GiftCategory::Eletrodomesticos),
        "Utensílios Domésticos" => Ok(GiftCategory::UtensiliosDomesticos),
        "Cozinha" => Ok(GiftCategory::Cozinha),
        "Móveis" => Ok(GiftCategory::Moveis),
        "Decoração" => Ok(GiftCategory::Decoracao),
        "Vale-Presente" => Ok(GiftCategory::ValePresente),
        "Enxoval" => Ok(GiftCategory::Enxoval),
        "Outros" => Ok(GiftCategory::Outros),
        other => Err(GiftValidationError::UnknownCategory(other.to_string())),
    }
}

/// Gift lifecycle state.
///
/// `Claimed` is the only value written today; the enum exists so future
/// states can be added without changing the record shape. Listing filters on
/// status, so rows holding a value this build does not know are skipped
/// instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftStatus {
    /// A guest has committed to bringing this gift.
    #[serde(rename = "claimed", alias = "Ganho")]
    Claimed,
}

impl GiftStatus {
    /// Canonical wire value stored in the `Status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claimed => "claimed",
        }
    }
}

/// Parses one status from its wire value.
///
/// `Ganho` is the value written by the registry's first deployment and is
/// accepted as `Claimed` so existing worksheets keep loading. Any other
/// value is a status this build does not know (`None`), not an error.
pub fn parse_gift_status(value: &str) -> Option<GiftStatus> {
    match value.trim() {
        "claimed" | "Ganho" => Some(GiftStatus::Claimed),
        _ => None,
    }
}

/// Validation error raised at the record construction boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftValidationError {
    /// Item name is empty after trimming.
    EmptyItem,
    /// Item name contains `\n` or `\r`; the submission field is single-line.
    MultiLineItem,
    /// Record id is the nil uuid.
    NilId,
    /// Category name is not part of the fixed set.
    UnknownCategory(String),
}

impl Display for GiftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItem => write!(f, "gift item name must not be empty"),
            Self::MultiLineItem => write!(f, "gift item name must be a single line"),
            Self::NilId => write!(f, "gift id must not be the nil uuid"),
            Self::UnknownCategory(value) => write!(f, "unknown gift category `{value}`"),
        }
    }
}

impl Error for GiftValidationError {}

/// One gift-claim row, validated into typed form.
///
/// Serialized field names follow the backing medium's column header
/// (`ID,Item,Categoria,Status`) so wire payloads and worksheet rows read the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GiftRecordWire")]
pub struct GiftRecord {
    /// Stable opaque id generated at creation.
    #[serde(rename = "ID")]
    pub id: GiftId,
    /// Trimmed free-text gift name.
    #[serde(rename = "Item")]
    pub item: String,
    /// One of the fixed category set.
    #[serde(rename = "Categoria")]
    pub category: GiftCategory,
    /// Lifecycle state; always `Claimed` for records created here.
    #[serde(rename = "Status")]
    pub status: GiftStatus,
}

impl GiftRecord {
    /// Creates a record for a fresh submission with a generated id.
    ///
    /// The item name is trimmed before validation; the stored record keeps
    /// the trimmed form.
    pub fn new(
        item: impl Into<String>,
        category: GiftCategory,
    ) -> Result<Self, GiftValidationError> {
        Self::with_id(Uuid::new_v4(), item, category)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by decode paths where identity already exists in the medium.
    pub fn with_id(
        id: GiftId,
        item: impl Into<String>,
        category: GiftCategory,
    ) -> Result<Self, GiftValidationError> {
        if id.is_nil() {
            return Err(GiftValidationError::NilId);
        }
        let item = normalized_item(item.into())?;
        Ok(Self {
            id,
            item,
            category,
            status: GiftStatus::Claimed,
        })
    }

    /// Returns whether this record counts toward the confirmed-gift listing.
    pub fn is_claimed(&self) -> bool {
        self.status == GiftStatus::Claimed
    }
}

fn normalized_item(value: String) -> Result<String, GiftValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GiftValidationError::EmptyItem);
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(GiftValidationError::MultiLineItem);
    }
    Ok(trimmed.to_string())
}

#[derive(Deserialize)]
struct GiftRecordWire {
    #[serde(rename = "ID")]
    id: GiftId,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Categoria")]
    category: GiftCategory,
    #[serde(rename = "Status")]
    status: GiftStatus,
}

impl TryFrom<GiftRecordWire> for GiftRecord {
    type Error = GiftValidationError;

    fn try_from(wire: GiftRecordWire) -> Result<Self, Self::Error> {
        let mut record = GiftRecord::with_id(wire.id, wire.item, wire.category)?;
        record.status = wire.status;
        Ok(record)
    }
}
