use chrono::NaiveDate;
use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    ApplicationDraft, ApplicationService, EntryForm, FixedClock, ListView, PromptResult,
    RecordStore, SalaryRange, SqliteRecordStore, StoreApplicationRepository, Tag,
};
use rusqlite::Connection;

type SqliteService<'conn> =
    ApplicationService<StoreApplicationRepository<SqliteRecordStore<'conn>>, FixedClock>;

fn service(conn: &Connection, epoch_ms: i64) -> SqliteService<'_> {
    let repo = StoreApplicationRepository::new(SqliteRecordStore::new(conn));
    ApplicationService::with_clock(repo, FixedClock::new(epoch_ms))
}

fn full_draft() -> ApplicationDraft {
    ApplicationDraft::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
        .with_company_name("Google")
        .with_position("Quality Analyst")
        .select_salary(SalaryRange::From15kTo20k)
        .toggle_tag(Tag::Remote)
        .toggle_tag(Tag::Internship)
        .with_notes("Company Information")
}

#[test]
fn saved_record_lists_back_with_identical_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn, 1_700_000_000_000);
    let mut form = EntryForm::from_draft(full_draft());

    let outcome = form.save(&mut service).unwrap();
    let view = ListView::mount(&service).unwrap();

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].key, outcome.saved.key);
    assert_eq!(view.items()[0].record, full_draft().to_record());
}

#[test]
fn deleting_one_of_n_leaves_n_minus_one() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn, 1_000);
    for company in ["Alpha", "Beta", "Gamma", "Delta"] {
        let draft = service.new_draft().with_company_name(company);
        service.save_draft(&draft).unwrap();
    }

    let mut view = ListView::mount(&service).unwrap();
    let doomed = view.long_press(2).unwrap().record.clone();
    let result = view.confirm(&mut service).unwrap();
    assert!(matches!(result, PromptResult::Deleted(ref gone) if gone.record == doomed));
    assert_eq!(view.items().len(), 3);

    view.refresh(&service).unwrap();
    assert_eq!(view.items().len(), 3);
    assert!(view.items().iter().all(|item| item.record != doomed));
}

#[test]
fn listing_empty_store_yields_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn, 1);

    let view = ListView::mount(&service).unwrap();
    assert!(view.items().is_empty());
    assert_eq!(view.skipped(), 0);
}

#[test]
fn unparseable_entry_is_skipped_without_aborting_listing() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn, 5_000);
    service.save_draft(&full_draft()).unwrap();
    {
        let mut store = SqliteRecordStore::new(&conn);
        store
            .set_item("application_1", r#"{"companyName": 42}"#)
            .unwrap();
        store.set_item("onboarding_seen", "true").unwrap();
    }

    let view = ListView::mount(&service).unwrap();
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].record.company_name, "Google");
    assert_eq!(view.skipped(), 1);
}

#[test]
fn rapid_saves_at_same_instant_get_distinct_keys_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn, 9_000);
    let first = service
        .save_draft(&service.new_draft().with_company_name("first"))
        .unwrap();
    let second = service
        .save_draft(&service.new_draft().with_company_name("second"))
        .unwrap();
    assert_ne!(first.key, second.key);

    let view = ListView::mount(&service).unwrap();
    let companies: Vec<&str> = view
        .items()
        .iter()
        .map(|item| item.record.company_name.as_str())
        .collect();
    assert_eq!(companies, vec!["first", "second"]);
}

#[test]
fn details_lookup_returns_saved_record() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn, 77);
    let saved = service.save_draft(&full_draft()).unwrap();

    let view = ListView::mount(&service).unwrap();
    let jobtrack_core::Screen::Details(key) = view.tap(0).unwrap() else {
        panic!("tap should open details");
    };
    let loaded = service.get_application(&key).unwrap().unwrap();
    assert_eq!(loaded, saved.record);
}
