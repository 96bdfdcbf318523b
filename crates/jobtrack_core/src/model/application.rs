//! Application record model.
//!
//! # Responsibility
//! - Define the canonical record written by the entry form.
//! - Define the fixed salary band and tag vocabularies.
//! - Define the storage key scheme for records.
//!
//! # Invariants
//! - Wire field names are `companyName`, `position`, `salaryRange`, `notes`,
//!   `selectedTags`, `date`.
//! - An unselected salary band is written as the empty string.
//! - Keys have the shape `application_<epoch_ms>`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Prefix shared by every application record key.
pub const APPLICATION_KEY_PREFIX: &str = "application_";

/// Salary band offered by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalaryRange {
    #[serde(rename = "15k to 20k")]
    From15kTo20k,
    #[serde(rename = "20k to 25k")]
    From20kTo25k,
}

impl SalaryRange {
    /// All bands in display order.
    pub const ALL: [SalaryRange; 2] = [Self::From15kTo20k, Self::From20kTo25k];

    pub fn label(self) -> &'static str {
        match self {
            Self::From15kTo20k => "15k to 20k",
            Self::From20kTo25k => "20k to 25k",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl Display for SalaryRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Work-arrangement label from the fixed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "Full-time")]
    FullTime,
    Remote,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Hybrid,
    Onsite,
}

impl Tag {
    /// Vocabulary in display order.
    pub const ALL: [Tag; 6] = [
        Self::FullTime,
        Self::Remote,
        Self::PartTime,
        Self::Internship,
        Self::Hybrid,
        Self::Onsite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::Remote => "Remote",
            Self::PartTime => "Part-time",
            Self::Internship => "Internship",
            Self::Hybrid => "Hybrid",
            Self::Onsite => "Onsite",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage key of one persisted application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationKey(String);

impl ApplicationKey {
    /// Builds the key for a record created at `epoch_ms`.
    pub fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(format!("{APPLICATION_KEY_PREFIX}{epoch_ms}"))
    }

    /// Accepts any raw key carrying the application prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let suffix = raw.strip_prefix(APPLICATION_KEY_PREFIX)?;
        if suffix.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Timestamp component, when the suffix is numeric.
    pub fn epoch_ms(&self) -> Option<i64> {
        self.0[APPLICATION_KEY_PREFIX.len()..].parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ApplicationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub company_name: String,
    pub position: String,
    #[serde(
        serialize_with = "serialize_salary",
        deserialize_with = "deserialize_salary",
        default
    )]
    pub salary_range: Option<SalaryRange>,
    pub notes: String,
    #[serde(default)]
    pub selected_tags: BTreeSet<Tag>,
    pub date: NaiveDate,
}

impl ApplicationRecord {
    /// Encodes the record as its stored JSON value.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes one stored JSON value.
    pub fn from_json(value: &str) -> serde_json::Result<Self> {
        serde_json::from_str(value)
    }

    /// Case-insensitive match against company name or position.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.company_name.to_lowercase().contains(&needle)
            || self.position.to_lowercase().contains(&needle)
    }
}

fn serialize_salary<S: Serializer>(
    value: &Option<SalaryRange>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.map_or("", SalaryRange::label))
}

fn deserialize_salary<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SalaryRange>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(None);
    }
    SalaryRange::from_label(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown salary range `{raw}`")))
}
