//! Label patterns for Muqeem record extraction.
//!
//! Each pattern captures the value in group 1. Values of varying width are
//! bounded by the label that follows them rather than by a fixed length.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Name, translated variant first
    pub static ref TRANSLATED_NAME: Regex = Regex::new(
        r"Translated Name\s+(.*?)\s+(?:Birth Date|Nationality|Iqama|Passport|Gender|Issue Date)"
    ).unwrap();

    pub static ref NAME: Regex = Regex::new(
        r"\bName\s+(.*?)\s+(?:Birth Date|Nationality|Iqama|Passport|Gender|Issue Date)"
    ).unwrap();

    pub static ref NATIONALITY: Regex = Regex::new(
        r"Nationality\s+([^\n]+)"
    ).unwrap();

    // Passport section
    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"(?i)Passport Information\s+Number\s+([A-Z0-9]+)"
    ).unwrap();

    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"Issue Date\s+([0-9\-]+)\s+Expiry Date"
    ).unwrap();

    pub static ref ISSUE_LOCATION: Regex = Regex::new(
        r"Issue Location\s+(.+?)\s+Iqama Information"
    ).unwrap();

    // Birth date: first ISO date directly after a label
    pub static ref BIRTH_DATE: Regex = Regex::new(
        r"Birth Date\s+(\d{4}-\d{2}-\d{2})\b"
    ).unwrap();

    // Iqama section
    pub static ref IQAMA_NUMBER: Regex = Regex::new(
        r"Iqama Number\s+(\d+)"
    ).unwrap();
}
