//! Contract form mapping and population.

mod document;
mod mapper;
mod populator;

pub use document::{FormDocument, Template, Widget};
pub use mapper::{map_fields, FieldMapper, TemplateField, TemplateFieldMap};
pub use populator::{populate, FieldWriteFailure, FillReport, FormPopulator};

use crate::error::FormError;

/// Result type for form field operations.
pub type Result<T> = std::result::Result<T, FormError>;
