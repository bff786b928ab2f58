//! Data models for Muqeem records, contract parameters and configuration.

pub mod config;
pub mod contract;
pub mod record;

pub use contract::{ContractParameters, DateComponents};
pub use record::{MissingField, SourceRecord, NOT_FOUND};
