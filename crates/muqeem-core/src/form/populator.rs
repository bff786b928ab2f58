//! Writes a [`TemplateFieldMap`] into every matching widget of a form.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::document::FormDocument;
use super::mapper::TemplateFieldMap;

/// A field that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWriteFailure {
    /// Fully qualified field name.
    pub field: String,
    /// Page the widget sits on.
    pub page: u32,
    /// Why the write failed.
    pub reason: String,
}

/// Outcome of populating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Widgets written, by field name.
    pub filled: Vec<String>,
    /// Widgets whose write failed.
    pub failures: Vec<FieldWriteFailure>,
    /// Widgets left alone because the map has no value for them.
    pub untouched: Vec<String>,
}

impl FillReport {
    /// True when no widget failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fills form widgets from a field map.
#[derive(Debug, Clone)]
pub struct FormPopulator {
    need_appearances: bool,
}

impl FormPopulator {
    pub fn new() -> Self {
        Self {
            need_appearances: true,
        }
    }

    /// Whether to raise `/NeedAppearances` after filling.
    pub fn with_need_appearances(mut self, need_appearances: bool) -> Self {
        self.need_appearances = need_appearances;
        self
    }

    /// Write every mapped value into every widget carrying its name.
    ///
    /// A failing widget is recorded in the report and does not stop the
    /// remaining widgets from being filled.
    pub fn populate(&self, document: &mut FormDocument, fields: &TemplateFieldMap) -> FillReport {
        let mut report = FillReport::default();

        for (page, page_id) in document.pages() {
            for widget in document.widgets(page, page_id) {
                let Some(value) = fields.get(&widget.name) else {
                    trace!("No value for '{}' on page {}", widget.name, page);
                    report.untouched.push(widget.name);
                    continue;
                };

                match document.set_widget_value(&widget, value) {
                    Ok(()) => report.filled.push(widget.name),
                    Err(e) => {
                        warn!("Could not fill '{}': {}", widget.name, e);
                        report.failures.push(FieldWriteFailure {
                            field: widget.name,
                            page,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if self.need_appearances && !report.filled.is_empty() {
            if let Err(e) = document.set_need_appearances() {
                warn!("Could not request appearance regeneration: {}", e);
            }
        }

        debug!(
            "Filled {} widgets, {} failed, {} untouched",
            report.filled.len(),
            report.failures.len(),
            report.untouched.len()
        );
        report
    }
}

impl Default for FormPopulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Populate with default settings.
pub fn populate(document: &mut FormDocument, fields: &TemplateFieldMap) -> FillReport {
    FormPopulator::new().populate(document, fields)
}
