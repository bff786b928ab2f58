//! Muqeem record parser driven by the rule table.

use std::collections::HashMap;

use tracing::{debug, info};

use super::rules::{FieldRule, SourceField, MUQEEM_RULES};
use crate::models::config::ExtractionConfig;
use crate::models::{SourceRecord, NOT_FOUND};

/// Result of parsing one record.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: SourceRecord,
    /// Fields whose labels were not found and fell back to defaults.
    pub misses: Vec<SourceField>,
}

/// Parser turning first-page text into a [`SourceRecord`].
pub struct MuqeemParser {
    rules: &'static [FieldRule],
    blood_type: String,
}

impl MuqeemParser {
    /// Create a parser with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: &MUQEEM_RULES,
            blood_type: ExtractionConfig::default().blood_type,
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_blood_type(config.blood_type.clone())
    }

    /// Set the blood type written to every record.
    pub fn with_blood_type(mut self, blood_type: impl Into<String>) -> Self {
        self.blood_type = blood_type.into();
        self
    }

    /// Parse a record. Never fails: every miss resolves to its default.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        info!("Parsing Muqeem record from {} characters of text", text.len());

        let mut found: HashMap<SourceField, String> = HashMap::new();
        let mut misses = Vec::new();

        for rule in self.rules {
            match rule.extract(text) {
                Some(m) => {
                    debug!("{} matched by tier {}: {:?}", rule.field.label(), m.tier, m.value);
                    found.insert(rule.field, m.value);
                }
                None => {
                    debug!("{} not found", rule.field.label());
                    misses.push(rule.field);
                }
            }
        }

        // Required fields stay `None` on a miss, descriptive ones get the sentinel
        let name = found.remove(&SourceField::Name);
        let nationality = found.remove(&SourceField::Nationality);
        let iqama_number = found.remove(&SourceField::Iqama);
        let mut or_default = |field: SourceField| {
            found.remove(&field).unwrap_or_else(|| NOT_FOUND.to_string())
        };

        let record = SourceRecord {
            name,
            nationality,
            passport_number: or_default(SourceField::Passport),
            issue_date: or_default(SourceField::IssueDate),
            issue_location: or_default(SourceField::IssueLocation),
            birth_date: or_default(SourceField::BirthDate),
            iqama_number,
            blood_type: self.blood_type.clone(),
        };

        ExtractionResult { record, misses }
    }
}

impl Default for MuqeemParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a record with default settings.
pub fn extract(text: &str) -> SourceRecord {
    MuqeemParser::new().parse(text).record
}
