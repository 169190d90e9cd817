//! Lead records and the results produced while validating and loading them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Lead fields
// ============================================================================

/// A recognized lead column.
///
/// The declaration order is the canonical column order used when no input
/// header dictates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    CompanyName,
    ContactPerson,
    Email,
    Industry,
    Status,
    PhoneNum,
    Website,
}

impl LeadField {
    pub const ALL: [LeadField; 7] = [
        LeadField::CompanyName,
        LeadField::ContactPerson,
        LeadField::Email,
        LeadField::Industry,
        LeadField::Status,
        LeadField::PhoneNum,
        LeadField::Website,
    ];

    /// Column name as it appears in CSV headers and in the `leads` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::CompanyName => "company_name",
            LeadField::ContactPerson => "contact_person",
            LeadField::Email => "email",
            LeadField::Industry => "industry",
            LeadField::Status => "status",
            LeadField::PhoneNum => "phone_num",
            LeadField::Website => "website",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "company_name" => Ok(LeadField::CompanyName),
            "contact_person" => Ok(LeadField::ContactPerson),
            "email" => Ok(LeadField::Email),
            "industry" => Ok(LeadField::Industry),
            "status" => Ok(LeadField::Status),
            "phone_num" => Ok(LeadField::PhoneNum),
            "website" => Ok(LeadField::Website),
            other => Err(format!("Unrecognized lead column: '{}'", other)),
        }
    }
}

// ============================================================================
// Lead record
// ============================================================================

/// One lead as read from a CSV row.
///
/// `None` means the column was not present in the input; `Some("")` means it
/// was present but blank. Validation treats both as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl LeadRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with(mut self, field: LeadField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Raw field value, distinguishing "absent" from "blank".
    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Field value with absence normalized to the empty string.
    pub fn value(&self, field: LeadField) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Field value for storage: absent and blank both become `None`.
    pub fn non_empty(&self, field: LeadField) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    fn slot(&self, field: LeadField) -> &Option<String> {
        match field {
            LeadField::CompanyName => &self.company_name,
            LeadField::ContactPerson => &self.contact_person,
            LeadField::Email => &self.email,
            LeadField::Industry => &self.industry,
            LeadField::Status => &self.status,
            LeadField::PhoneNum => &self.phone_num,
            LeadField::Website => &self.website,
        }
    }

    fn slot_mut(&mut self, field: LeadField) -> &mut Option<String> {
        match field {
            LeadField::CompanyName => &mut self.company_name,
            LeadField::ContactPerson => &mut self.contact_person,
            LeadField::Email => &mut self.email,
            LeadField::Industry => &mut self.industry,
            LeadField::Status => &mut self.status,
            LeadField::PhoneNum => &mut self.phone_num,
            LeadField::Website => &mut self.website,
        }
    }
}

impl fmt::Display for LeadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write!(f, "{{")?;
        for field in LeadField::ALL {
            if let Some(value) = self.get(field) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {:?}", field, value)?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Validation results
// ============================================================================

/// Every violation found for one record, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    messages: Vec<String>,
}

impl ValidationResult {
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

/// A row rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based position of the row in the source file (header excluded).
    pub row_number: usize,
    pub record: LeadRecord,
    pub messages: Vec<String>,
}

// ============================================================================
// Load results
// ============================================================================

/// Kind of a per-row storage failure. Never a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageErrorKind {
    /// Uniqueness constraint violated (the lead already exists).
    Duplicate,
    /// Any other row-level rejection by the store.
    Rejected,
}

impl StorageErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorKind::Duplicate => "duplicate",
            StorageErrorKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A valid row the store refused to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRowError {
    /// 1-based position within the inserted batch. File reports carry the
    /// source row number instead.
    pub row: usize,
    pub record: LeadRecord,
    pub reason: String,
    pub kind: StorageErrorKind,
}

/// Outcome of one bulk insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded: u64,
    pub failed: u64,
    pub errors: Vec<StorageRowError>,
}

impl LoadReport {
    pub fn record_loaded(&mut self) {
        self.loaded += 1;
    }

    pub fn record_failure(&mut self, error: StorageRowError) {
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn duplicates(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.kind == StorageErrorKind::Duplicate)
            .count()
    }
}
