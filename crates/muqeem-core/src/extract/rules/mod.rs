//! Declarative rule table for Muqeem fields.
//!
//! A field is described by an ordered list of matchers. The first matcher
//! that yields a value wins; later ones are fallbacks for layout variants.

pub mod patterns;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use patterns::*;

/// Semantic fields read from a Muqeem record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    Name,
    Nationality,
    Passport,
    IssueDate,
    IssueLocation,
    BirthDate,
    Iqama,
}

impl SourceField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Nationality => "Nationality",
            Self::Passport => "Passport",
            Self::IssueDate => "IssueDate",
            Self::IssueLocation => "IssueLocation",
            Self::BirthDate => "BirthDate",
            Self::Iqama => "Iqama",
        }
    }
}

/// One way of locating a field: a pattern capturing the value between its
/// label and the following label (or the value's own shape).
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    pattern: &'static Regex,
}

impl Matcher {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }

    /// Captured value and its byte span, if the pattern matches and the
    /// value is non-empty.
    pub fn apply(&self, text: &str) -> Option<(String, (usize, usize))> {
        let caps = self.pattern.captures(text)?;
        let group = caps.get(1)?;
        let value = group.as_str().trim();

        if value.is_empty() {
            return None;
        }

        Some((value.to_string(), (group.start(), group.end())))
    }
}

/// A located field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Extracted value, trimmed.
    pub value: String,
    /// Index of the matcher that produced the value (0 = primary).
    pub tier: usize,
    /// Position of the raw capture in the source text.
    pub position: (usize, usize),
}

/// Ordered matchers for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: SourceField,
    pub matchers: Vec<Matcher>,
}

impl FieldRule {
    pub fn new(field: SourceField, matchers: Vec<Matcher>) -> Self {
        Self { field, matchers }
    }

    /// First successful matcher, in priority order.
    pub fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        self.matchers.iter().enumerate().find_map(|(tier, matcher)| {
            matcher
                .apply(text)
                .map(|(value, position)| ExtractionMatch { value, tier, position })
        })
    }
}

lazy_static! {
    /// Rules for every extracted Muqeem field.
    pub static ref MUQEEM_RULES: Vec<FieldRule> = vec![
        FieldRule::new(
            SourceField::Name,
            vec![Matcher::new(&TRANSLATED_NAME), Matcher::new(&NAME)],
        ),
        FieldRule::new(SourceField::Nationality, vec![Matcher::new(&NATIONALITY)]),
        FieldRule::new(SourceField::Passport, vec![Matcher::new(&PASSPORT_NUMBER)]),
        FieldRule::new(SourceField::IssueDate, vec![Matcher::new(&ISSUE_DATE)]),
        FieldRule::new(SourceField::IssueLocation, vec![Matcher::new(&ISSUE_LOCATION)]),
        FieldRule::new(SourceField::BirthDate, vec![Matcher::new(&BIRTH_DATE)]),
        FieldRule::new(SourceField::Iqama, vec![Matcher::new(&IQAMA_NUMBER)]),
    ];
}

/// Rule for `field` in the Muqeem table.
pub fn rule_for(field: SourceField) -> Option<&'static FieldRule> {
    MUQEEM_RULES.iter().find(|r| r.field == field)
}
