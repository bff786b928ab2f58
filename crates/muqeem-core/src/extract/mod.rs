//! Muqeem record field extraction.

mod parser;
pub mod rules;

pub use parser::{extract, ExtractionResult, MuqeemParser};
pub use rules::{ExtractionMatch, FieldRule, Matcher, SourceField};
