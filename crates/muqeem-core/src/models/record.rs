//! Identity fields extracted from a Muqeem record.

use serde::{Deserialize, Serialize};

/// Value substituted for a field whose label was not found.
pub const NOT_FOUND: &str = "Not found";

/// Semantic data extracted from one Muqeem document.
///
/// Fields that decide whether a record is usable (`name`, `iqama_number`)
/// are `None` when not found so a miss is never confused with a value.
/// Descriptive fields fall back to [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Full name, translated when the document carries a translation.
    pub name: Option<String>,

    /// Nationality as printed.
    pub nationality: Option<String>,

    /// Passport number.
    pub passport_number: String,

    /// Passport issue date.
    pub issue_date: String,

    /// Passport issue location.
    pub issue_location: String,

    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,

    /// Iqama (residency permit) number.
    pub iqama_number: Option<String>,

    /// Blood type.
    pub blood_type: String,
}

/// A required field absent from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Name,
    IqamaNumber,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::IqamaNumber => "iqama_number",
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SourceRecord {
    fn default() -> Self {
        Self {
            name: None,
            nationality: None,
            passport_number: NOT_FOUND.to_string(),
            issue_date: NOT_FOUND.to_string(),
            issue_location: NOT_FOUND.to_string(),
            birth_date: NOT_FOUND.to_string(),
            iqama_number: None,
            blood_type: String::new(),
        }
    }
}

impl SourceRecord {
    /// Required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();

        let has_name = self
            .name
            .as_deref()
            .map(str::trim)
            .is_some_and(|n| !n.is_empty() && n != NOT_FOUND);
        if !has_name {
            missing.push(MissingField::Name);
        }

        let has_iqama = self
            .iqama_number
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        if !has_iqama {
            missing.push(MissingField::IqamaNumber);
        }

        missing
    }

    /// A record is valid when both name and Iqama number are present.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Passport issue date and location as written to the combined form field.
    pub fn issue_summary(&self) -> String {
        format!("{} - {}", self.issue_date, self.issue_location)
    }
}
