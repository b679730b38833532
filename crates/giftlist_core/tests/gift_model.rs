use giftlist_core::{GiftCategory, GiftRecord, GiftStatus, GiftValidationError};
use serde_json::json;
use uuid::Uuid;

#[test]
fn new_record_mints_a_v4_id_and_claimed_status() {
    let record = GiftRecord::new("Panela", GiftCategory::Cozinha).unwrap();

    assert_eq!(record.id.get_version_num(), 4);
    assert!(!record.id.is_nil());
    assert_eq!(record.status, GiftStatus::Claimed);
    assert!(record.is_claimed());
}

#[test]
fn serialization_uses_medium_column_names() {
    let record = GiftRecord::new("Panela", GiftCategory::Cozinha).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["Item"], "Panela");
    assert_eq!(value["Categoria"], "Cozinha");
    assert_eq!(value["Status"], "claimed");
    let id = value["ID"].as_str().unwrap();
    assert_eq!(Uuid::parse_str(id).unwrap(), record.id);
}

#[test]
fn record_round_trips_through_json() {
    let record = GiftRecord::new("Aparelho de jantar", GiftCategory::UtensiliosDomesticos).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let parsed: GiftRecord = serde_json::from_value(value).unwrap();

    assert_eq!(parsed, record);
}

#[test]
fn deserialization_accepts_the_legacy_status_value() {
    let parsed: GiftRecord = serde_json::from_value(json!({
        "ID": Uuid::new_v4().to_string(),
        "Item": "Faqueiro",
        "Categoria": "Cozinha",
        "Status": "Ganho",
    }))
    .unwrap();

    assert_eq!(parsed.status, GiftStatus::Claimed);
}

#[test]
fn deserialization_rejects_a_blank_item() {
    let err = serde_json::from_value::<GiftRecord>(json!({
        "ID": Uuid::new_v4().to_string(),
        "Item": "   ",
        "Categoria": "Outros",
        "Status": "claimed",
    }))
    .unwrap_err();

    assert!(err.to_string().contains("empty"));
}

#[test]
fn deserialization_rejects_the_nil_id() {
    let err = serde_json::from_value::<GiftRecord>(json!({
        "ID": "00000000-0000-0000-0000-000000000000",
        "Item": "Panela",
        "Categoria": "Cozinha",
        "Status": "claimed",
    }))
    .unwrap_err();

    assert!(err.to_string().contains("nil"));
}

#[test]
fn deserialization_rejects_an_unknown_category() {
    let parsed = serde_json::from_value::<GiftRecord>(json!({
        "ID": Uuid::new_v4().to_string(),
        "Item": "Furadeira",
        "Categoria": "Ferramentas",
        "Status": "claimed",
    }));

    assert!(parsed.is_err());
}

#[test]
fn new_trims_the_item_name() {
    let record = GiftRecord::new("  Panela de pressão  ", GiftCategory::Cozinha).unwrap();
    assert_eq!(record.item, "Panela de pressão");
}

#[test]
fn new_rejects_empty_and_multiline_items() {
    assert_eq!(
        GiftRecord::new("", GiftCategory::Outros).unwrap_err(),
        GiftValidationError::EmptyItem
    );
    assert_eq!(
        GiftRecord::new("   ", GiftCategory::Outros).unwrap_err(),
        GiftValidationError::EmptyItem
    );
    assert_eq!(
        GiftRecord::new("linha um\nlinha dois", GiftCategory::Outros).unwrap_err(),
        GiftValidationError::MultiLineItem
    );
}

#[test]
fn with_id_rejects_the_nil_uuid() {
    assert_eq!(
        GiftRecord::with_id(Uuid::nil(), "Panela", GiftCategory::Cozinha).unwrap_err(),
        GiftValidationError::NilId
    );
}
