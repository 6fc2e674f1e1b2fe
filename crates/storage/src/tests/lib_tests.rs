use super::*;

use chrono::{TimeZone, Utc};
use shared::{Opportunity, OpportunityId, Status};

fn sample(id: i64, title: &str, company: &str) -> Opportunity {
    let at = Utc
        .timestamp_millis_opt(1_700_000_000_000 + id * 1_000)
        .single()
        .expect("timestamp");
    Opportunity::new(OpportunityId(id), title, company, at)
}

#[test]
fn missing_entry_loads_as_none() {
    let store = Store::new(MemoryBackend::new());
    assert!(store.load().expect("load").is_none());
}

#[test]
fn save_then_load_reproduces_collection_and_counter() {
    let mut store = Store::new(MemoryBackend::new());
    let mut moved = sample(2, "B", "Y");
    moved.transition(Status::Applied, moved.created_at() + chrono::Duration::seconds(30));
    let records = vec![sample(1, "A", "X"), moved, sample(5, "C", "Z")];

    store.save(&records, OpportunityId(6)).expect("save");
    let loaded = store.load().expect("load").expect("snapshot present");

    assert_eq!(loaded.opportunities, records);
    assert_eq!(loaded.current_id, OpportunityId(6));
}

#[test]
fn writes_the_documented_json_shape() {
    let mut store = Store::new(MemoryBackend::new());
    store.save(&[sample(1, "A", "X")], OpportunityId(2)).expect("save");

    let raw = store
        .backend()
        .entry(DEFAULT_STORAGE_KEY)
        .expect("entry written");
    let value: serde_json::Value = serde_json::from_str(raw).expect("json");
    assert_eq!(value["currentId"], 2);
    assert_eq!(value["opportunities"][0]["title"], "A");
    assert_eq!(value["opportunities"][0]["status"], "saved");
    assert_eq!(value["opportunities"][0]["createdAt"], "2023-11-14T22:13:21.000Z");
}

#[test]
fn unparsable_payload_is_corrupt() {
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, "{not json");
    let err = Store::new(backend).load().expect_err("corrupt");
    assert!(err.is_corrupt());
    assert!(matches!(BoardError::from(err), BoardError::CorruptState(_)));
}

#[test]
fn duplicate_ids_are_corrupt() {
    let payload = serde_json::json!({
        "opportunities": [sample(1, "A", "X"), sample(1, "B", "Y")],
        "currentId": 3,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    assert!(Store::new(backend).load().expect_err("duplicate").is_corrupt());
}

#[test]
fn time_inverted_record_is_corrupt() {
    let payload = serde_json::json!({
        "opportunities": [{
            "id": 1,
            "title": "A",
            "company": "X",
            "status": "applied",
            "createdAt": "2024-05-02T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z",
        }],
        "currentId": 2,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    assert!(Store::new(backend).load().expect_err("inverted").is_corrupt());
}

#[test]
fn non_positive_id_is_corrupt() {
    let payload = serde_json::json!({
        "opportunities": [sample(0, "A", "X")],
        "currentId": 1,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    assert!(Store::new(backend).load().expect_err("zero id").is_corrupt());
}

#[test]
fn max_id_at_end_of_id_space_is_corrupt() {
    let last = Opportunity::new(
        OpportunityId(i64::MAX),
        "A",
        "X",
        sample(1, "A", "X").created_at(),
    );
    let payload = serde_json::json!({
        "opportunities": [last],
        "currentId": 1,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    assert!(Store::new(backend).load().expect_err("no next id").is_corrupt());
}

#[test]
fn null_fields_keep_stored_records() {
    let payload = serde_json::json!({
        "opportunities": [sample(1, "A", "X"), sample(2, "B", "Y")],
        "currentId": null,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    let loaded = Store::new(backend).load().expect("load").expect("present");
    assert_eq!(loaded.opportunities.len(), 2);
    assert_eq!(loaded.current_id, OpportunityId(3));

    let backend = MemoryBackend::new()
        .with_entry(DEFAULT_STORAGE_KEY, r#"{"opportunities":null,"currentId":4}"#);
    let loaded = Store::new(backend).load().expect("load").expect("present");
    assert!(loaded.opportunities.is_empty());
    assert_eq!(loaded.current_id, OpportunityId(4));
}

#[test]
fn lagging_counter_is_advanced_past_max_id() {
    let payload = serde_json::json!({
        "opportunities": [sample(4, "A", "X"), sample(9, "B", "Y")],
        "currentId": 2,
    });
    let backend = MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, payload.to_string());
    let loaded = Store::new(backend).load().expect("load").expect("present");
    assert_eq!(loaded.current_id, OpportunityId(10));
}

#[test]
fn missing_counter_defaults_to_first_id() {
    let backend =
        MemoryBackend::new().with_entry(DEFAULT_STORAGE_KEY, r#"{"opportunities":[]}"#);
    let loaded = Store::new(backend).load().expect("load").expect("present");
    assert_eq!(loaded.current_id, OpportunityId::FIRST);
}

#[test]
fn rejected_write_surfaces_as_persistence_error() {
    let mut backend = MemoryBackend::new();
    backend.reject_writes("quota exceeded");
    let mut store = Store::new(backend);

    let err = store.save(&[], OpportunityId::FIRST).expect_err("rejected");
    assert!(matches!(BoardError::from(err), BoardError::Persistence(_)));
}

#[test]
fn file_backend_round_trips_and_leaves_no_staging_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backend = FileBackend::open(dir.path().join("nested").join("board")).expect("open");
    let mut store = Store::new(backend);

    store.save(&[sample(1, "A", "X")], OpportunityId(2)).expect("save");
    let loaded = store.load().expect("load").expect("present");
    assert_eq!(loaded.opportunities.len(), 1);

    let names: Vec<_> = std::fs::read_dir(store.backend().dir())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("opportunityBoard.json")]);
}

#[test]
fn file_backend_rejects_path_like_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let backend = FileBackend::open(dir.path()).expect("open");
    assert!(matches!(
        backend.read("../escape"),
        Err(StoreError::InvalidKey(_))
    ));
}

#[test]
fn clear_removes_entry() {
    let mut store = Store::new(MemoryBackend::new());
    store.save(&[], OpportunityId::FIRST).expect("save");
    store.clear().expect("clear");
    assert!(store.load().expect("load").is_none());
}
