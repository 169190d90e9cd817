//! Integration tests for the SQLite lead store.

use leadflow_db::{GroupCount, LeadStore};
use leadflow_protocol::{LeadField, LeadRecord, StorageErrorKind};

fn lead(company: &str, email: &str) -> LeadRecord {
    LeadRecord::new()
        .with(LeadField::CompanyName, company)
        .with(LeadField::Email, email)
}

#[tokio::test]
async fn test_bulk_insert_loads_all_rows() {
    let store = LeadStore::open_in_memory().await.unwrap();
    let records = vec![
        lead("Acme", "a@acme.com").with(LeadField::Industry, "Technology"),
        lead("Globex", "b@globex.com").with(LeadField::Status, "Qualified"),
    ];

    let report = store.bulk_insert(&records).await.unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.failed, 0);
    assert!(report.errors.is_empty());
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_empty_batch_is_a_no_op() {
    let store = LeadStore::open_in_memory().await.unwrap();
    let report = store.bulk_insert(&[]).await.unwrap();
    assert_eq!(report.loaded, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_email_is_reported_not_fatal() {
    let store = LeadStore::open_in_memory().await.unwrap();
    store.bulk_insert(&[lead("Acme", "a@acme.com")]).await.unwrap();

    let records = vec![
        lead("Initech", "i@initech.com"),
        lead("Acme Again", "a@acme.com"),
        lead("Hooli", "h@hooli.com"),
    ];
    let report = store.bulk_insert(&records).await.unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.duplicates(), 1);

    let error = &report.errors[0];
    assert_eq!(error.row, 2);
    assert_eq!(error.kind, StorageErrorKind::Duplicate);
    assert_eq!(error.record.get(LeadField::Email), Some("a@acme.com"));
    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_duplicate_within_one_batch() {
    let store = LeadStore::open_in_memory().await.unwrap();
    let records = vec![lead("Acme", "dup@acme.com"), lead("Acme 2", "dup@acme.com")];

    let report = store.bulk_insert(&records).await.unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_blank_optional_fields_stored_as_null_and_status_defaults() {
    let store = LeadStore::open_in_memory().await.unwrap();
    let record = lead("Acme", "a@acme.com")
        .with(LeadField::Industry, "")
        .with(LeadField::Status, "")
        .with(LeadField::PhoneNum, "555-0100");
    store.bulk_insert(&[record]).await.unwrap();

    let stored = store.list(10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].company_name, "Acme");
    assert_eq!(stored[0].industry, None);
    assert_eq!(stored[0].contact_person, None);
    assert_eq!(stored[0].status, "New");
    assert_eq!(stored[0].phone_num.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn test_truncate_resets_table() {
    let store = LeadStore::open_in_memory().await.unwrap();
    store
        .bulk_insert(&[lead("Acme", "a@acme.com"), lead("Globex", "b@globex.com")])
        .await
        .unwrap();

    let deleted = store.truncate().await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(store.count().await.unwrap(), 0);

    store.bulk_insert(&[lead("Acme", "a@acme.com")]).await.unwrap();
    let stored = store.list(10).await.unwrap();
    assert_eq!(stored[0].id, 1);
}

#[tokio::test]
async fn test_recreate_schema_drops_rows() {
    let store = LeadStore::open_in_memory().await.unwrap();
    store.bulk_insert(&[lead("Acme", "a@acme.com")]).await.unwrap();

    store.recreate_schema().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_report_queries() {
    let store = LeadStore::open_in_memory().await.unwrap();
    let records = vec![
        lead("Acme", "a@acme.com")
            .with(LeadField::Industry, "Technology")
            .with(LeadField::Status, "Qualified"),
        lead("Globex", "b@globex.com").with(LeadField::Industry, "Technology"),
        lead("Initech", "c@initech.com").with(LeadField::ContactPerson, "Bill"),
    ];
    store.bulk_insert(&records).await.unwrap();

    let by_status = store.leads_by_status().await.unwrap();
    assert_eq!(
        by_status,
        vec![
            GroupCount {
                key: Some("New".to_string()),
                count: 2
            },
            GroupCount {
                key: Some("Qualified".to_string()),
                count: 1
            },
        ]
    );

    // NULL sorts first in SQLite
    let by_industry = store.leads_by_industry().await.unwrap();
    assert_eq!(by_industry[0].key, None);
    assert_eq!(by_industry[0].count, 1);
    assert_eq!(by_industry[1].key.as_deref(), Some("Technology"));
    assert_eq!(by_industry[1].count, 2);

    let quality = store.data_quality().await.unwrap();
    let metric = |name: &str| {
        quality
            .iter()
            .find(|m| m.metric == name)
            .map(|m| m.value)
            .unwrap()
    };
    assert_eq!(metric("Total Rows"), 3);
    assert_eq!(metric("Rows by Status"), 3);
    assert_eq!(metric("Rows without Industry"), 1);
    assert_eq!(quality.len(), 3);
}
