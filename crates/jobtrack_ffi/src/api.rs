//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose application create/list/get/delete to Dart via FRB.
//! - Map core errors into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every failure is reported through `ok=false` plus a message.
//! - Labels crossing the boundary are the display labels of tags and bands.

use chrono::NaiveDate;
use jobtrack_core::db::open_db;
use jobtrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ApplicationDraft, ApplicationKey, ApplicationRecord, ApplicationService, CoreConfig,
    SalaryRange, SqliteRecordStore, StoreApplicationRepository, StoredApplication, SystemClock,
    Tag,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqliteService<'conn> =
    ApplicationService<StoreApplicationRepository<SqliteRecordStore<'conn>>, SystemClock>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Tag labels in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn tag_vocabulary() -> Vec<String> {
    Tag::ALL.iter().map(|tag| tag.label().to_string()).collect()
}

/// Salary band labels in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn salary_bands() -> Vec<String> {
    SalaryRange::ALL
        .iter()
        .map(|band| band.label().to_string())
        .collect()
}

/// Flat application view for list and details screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationItem {
    /// Storage key, used for details and delete calls.
    pub key: String,
    pub company_name: String,
    pub position: String,
    /// Band label, empty when none was selected.
    pub salary_range: String,
    pub notes: String,
    /// Tag labels in vocabulary order.
    pub tags: Vec<String>,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationActionResponse {
    pub ok: bool,
    /// Key of the affected application on success.
    pub key: Option<String>,
    pub message: String,
}

impl ApplicationActionResponse {
    fn success(message: impl Into<String>, key: String) -> Self {
        Self {
            ok: true,
            key: Some(key),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            key: None,
            message: message.into(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationListResponse {
    pub ok: bool,
    pub items: Vec<ApplicationItem>,
    /// Stored entries that could not be read.
    pub skipped: u32,
    pub message: String,
}

/// Details response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationGetResponse {
    pub ok: bool,
    pub item: Option<ApplicationItem>,
    pub message: String,
}

/// Saves a new application from form input.
///
/// # FFI contract
/// - `salary_range`: band label or empty for none.
/// - `tags`: labels from `tag_vocabulary()`; duplicates collapse.
/// - `date`: ISO `YYYY-MM-DD`, or `None` for today.
/// - Unknown labels or malformed dates fail without writing.
#[flutter_rust_bridge::frb(sync)]
pub fn application_create(
    company_name: String,
    position: String,
    salary_range: String,
    notes: String,
    tags: Vec<String>,
    date: Option<String>,
) -> ApplicationActionResponse {
    let result = with_service(|service| {
        let draft = build_draft(
            service.new_draft(),
            company_name,
            position,
            &salary_range,
            notes,
            &tags,
            date.as_deref(),
        )?;
        service.save_draft(&draft).map_err(|err| err.to_string())
    });
    match result {
        Ok(saved) => ApplicationActionResponse::success("Application saved.", saved.key.to_string()),
        Err(err) => ApplicationActionResponse::failure(format!("application_create failed: {err}")),
    }
}

/// Lists saved applications, optionally filtered by company/position text.
#[flutter_rust_bridge::frb(sync)]
pub fn application_list(query: Option<String>) -> ApplicationListResponse {
    let query = query.unwrap_or_default();
    let result = with_service(|service| {
        service
            .list_applications()
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(listing) => {
            let items = listing
                .items
                .iter()
                .filter(|stored| stored.record.matches_query(&query))
                .map(to_item)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No applications.".to_string()
            } else {
                format!("Found {} application(s).", items.len())
            };
            ApplicationListResponse {
                ok: true,
                items,
                skipped: u32::try_from(listing.skipped).unwrap_or(u32::MAX),
                message,
            }
        }
        Err(err) => ApplicationListResponse {
            ok: false,
            items: Vec::new(),
            skipped: 0,
            message: format!("application_list failed: {err}"),
        },
    }
}

/// Fetches one application for the details screen.
#[flutter_rust_bridge::frb(sync)]
pub fn application_get(key: String) -> ApplicationGetResponse {
    let result = with_service(|service| {
        let key = parse_key(&key)?;
        let record = service
            .get_application(&key)
            .map_err(|err| err.to_string())?;
        Ok(record.map(|record| to_item(&StoredApplication { key, record })))
    });
    match result {
        Ok(Some(item)) => ApplicationGetResponse {
            ok: true,
            item: Some(item),
            message: "Application found.".to_string(),
        },
        Ok(None) => ApplicationGetResponse {
            ok: true,
            item: None,
            message: "Application not found.".to_string(),
        },
        Err(err) => ApplicationGetResponse {
            ok: false,
            item: None,
            message: format!("application_get failed: {err}"),
        },
    }
}

/// Deletes one application after the UI confirmed the prompt.
#[flutter_rust_bridge::frb(sync)]
pub fn application_delete(key: String) -> ApplicationActionResponse {
    let result = with_service(|service| {
        let key = parse_key(&key)?;
        service
            .delete_application(&key)
            .map_err(|err| err.to_string())?;
        Ok(key)
    });
    match result {
        Ok(key) => ApplicationActionResponse::success("Application deleted.", key.to_string()),
        Err(err) => ApplicationActionResponse::failure(format!("application_delete failed: {err}")),
    }
}

fn build_draft(
    draft: ApplicationDraft,
    company_name: String,
    position: String,
    salary_range: &str,
    notes: String,
    tags: &[String],
    date: Option<&str>,
) -> Result<ApplicationDraft, String> {
    let mut draft = draft
        .with_company_name(company_name)
        .with_position(position)
        .with_notes(notes);

    if !salary_range.trim().is_empty() {
        let band = SalaryRange::from_label(salary_range)
            .ok_or_else(|| format!("unknown salary range `{salary_range}`"))?;
        draft = draft.select_salary(band);
    }
    for label in tags {
        let tag = Tag::from_label(label).ok_or_else(|| format!("unknown tag `{label}`"))?;
        draft = draft.select_tag(tag);
    }
    if let Some(raw) = date.map(str::trim).filter(|raw| !raw.is_empty()) {
        draft = draft.with_date(parse_iso_date(raw)?);
    }
    Ok(draft)
}

fn parse_key(raw: &str) -> Result<ApplicationKey, String> {
    ApplicationKey::parse(raw.trim()).ok_or_else(|| format!("invalid application key `{raw}`"))
}

fn to_item(stored: &StoredApplication) -> ApplicationItem {
    let ApplicationRecord {
        company_name,
        position,
        salary_range,
        notes,
        selected_tags,
        date,
    } = &stored.record;
    ApplicationItem {
        key: stored.key.to_string(),
        company_name: company_name.clone(),
        position: position.clone(),
        salary_range: salary_range.map(|band| band.label().to_string()).unwrap_or_default(),
        notes: notes.clone(),
        tags: selected_tags.iter().map(|tag| tag.label().to_string()).collect(),
        date: date.format("%Y-%m-%d").to_string(),
    }
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| CoreConfig::from_env().db_path)
        .clone()
}

fn open_entry_db() -> Result<Connection, String> {
    let db_path = resolve_entry_db_path();
    open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("entry DB open failed: {err}")
    })
}

fn with_service<T>(f: impl FnOnce(&mut SqliteService<'_>) -> Result<T, String>) -> Result<T, String> {
    let conn = open_entry_db()?;
    let repo = StoreApplicationRepository::new(SqliteRecordStore::new(&conn));
    let mut service = ApplicationService::new(repo);
    f(&mut service)
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("invalid date `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{
        application_create, application_delete, application_get, application_list, core_version,
        init_logging, ping, salary_bands, tag_vocabulary,
    };
    use jobtrack_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn vocabularies_match_form_labels() {
        assert_eq!(
            tag_vocabulary(),
            vec!["Full-time", "Remote", "Part-time", "Internship", "Hybrid", "Onsite"]
        );
        assert_eq!(salary_bands(), vec!["15k to 20k", "20k to 25k"]);
    }

    #[test]
    fn create_get_search_and_delete_roundtrip() {
        let company = unique_token("ffi-company");
        let created = application_create(
            company.clone(),
            "Quality Analyst".to_string(),
            "20k to 25k".to_string(),
            "notes".to_string(),
            vec!["Remote".to_string(), "remote".to_string(), "Hybrid".to_string()],
            Some("2026-10-16".to_string()),
        );
        assert!(created.ok, "{}", created.message);
        let key = created.key.expect("create should return key");

        let fetched = application_get(key.clone());
        let item = fetched.item.expect("created application should load");
        assert_eq!(item.company_name, company);
        assert_eq!(item.salary_range, "20k to 25k");
        assert_eq!(item.tags, vec!["Remote", "Hybrid"]);
        assert_eq!(item.date, "2026-10-16");

        let listed = application_list(Some(company.to_uppercase()));
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].key, key);

        let deleted = application_delete(key.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(application_get(key.clone()).item.is_none());
        assert!(!application_delete(key).ok);
    }

    #[test]
    fn create_rejects_unknown_labels_and_bad_dates() {
        let company = unique_token("ffi-reject");
        let bad_tag = application_create(
            company.clone(),
            String::new(),
            String::new(),
            String::new(),
            vec!["Freelance".to_string()],
            None,
        );
        assert!(!bad_tag.ok);
        assert!(bad_tag.message.contains("unknown tag"));

        let bad_date = application_create(
            company.clone(),
            String::new(),
            String::new(),
            String::new(),
            Vec::new(),
            Some("16/10/2026".to_string()),
        );
        assert!(!bad_date.ok);
        assert!(application_list(Some(company)).items.is_empty());
    }

    #[test]
    fn list_skips_corrupt_rows() {
        let company = unique_token("ffi-skip");
        let corrupt_key = format!("application_{}", unique_token("corrupt"));
        let conn = open_db(super::resolve_entry_db_path()).expect("open db");
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, 'not json');",
            [corrupt_key.as_str()],
        )
        .expect("insert corrupt row");

        let created = application_create(
            company.clone(),
            String::new(),
            String::new(),
            String::new(),
            Vec::new(),
            None,
        );
        assert!(created.ok, "{}", created.message);

        let listed = application_list(Some(company));
        assert!(listed.ok);
        assert_eq!(listed.items.len(), 1);
        assert!(listed.skipped >= 1);

        conn.execute("DELETE FROM kv_entries WHERE key = ?1;", [corrupt_key.as_str()])
            .expect("cleanup corrupt row");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
