//! Configuration structures for the extraction and form filling pipeline.

use serde::{Deserialize, Serialize};

use crate::form::TemplateField;

/// Main configuration for the muqeem pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MuqeemConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Target form configuration.
    pub form: FormConfig,

    /// Batch run configuration.
    pub batch: BatchConfig,

    /// Output naming configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Blood type written to every form. Muqeem prints do not carry it in
    /// a stable position, so it is supplied rather than extracted.
    pub blood_type: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            blood_type: "B+".to_string(),
        }
    }
}

/// Target form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Template field identifier for each target field.
    pub field_names: FieldNames,

    /// Ask viewers to regenerate field appearances after filling.
    pub need_appearances: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            field_names: FieldNames::default(),
            need_appearances: true,
        }
    }
}

/// Names of the fillable fields in the contract template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub full_name: String,
    pub nationality: String,
    pub iqama_number: String,
    pub passport_number: String,
    pub issue_date_location: String,
    pub birth_date: String,
    pub blood_type: String,
    pub po_reference: String,
    pub start_day: String,
    pub start_month: String,
    pub start_year: String,
    pub end_day: String,
    pub end_month: String,
    pub end_year: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            full_name: "fill_5".to_string(),
            nationality: "fill_6".to_string(),
            iqama_number: "fill_7".to_string(),
            passport_number: "fill_8".to_string(),
            issue_date_location: "fill_9".to_string(),
            birth_date: "fill_10".to_string(),
            blood_type: "fill_11".to_string(),
            po_reference: "Text1".to_string(),
            start_day: "Text2".to_string(),
            start_month: "Text3".to_string(),
            start_year: "Text4".to_string(),
            end_day: "Text5".to_string(),
            end_month: "Text6".to_string(),
            end_year: "Text7".to_string(),
        }
    }
}

impl FieldNames {
    /// Template identifier for a target field.
    pub fn id(&self, field: TemplateField) -> &str {
        match field {
            TemplateField::FullName => &self.full_name,
            TemplateField::Nationality => &self.nationality,
            TemplateField::IqamaNumber => &self.iqama_number,
            TemplateField::PassportNumber => &self.passport_number,
            TemplateField::IssueDateLocation => &self.issue_date_location,
            TemplateField::BirthDate => &self.birth_date,
            TemplateField::BloodType => &self.blood_type,
            TemplateField::PoReference => &self.po_reference,
            TemplateField::StartDay => &self.start_day,
            TemplateField::StartMonth => &self.start_month,
            TemplateField::StartYear => &self.start_year,
            TemplateField::EndDay => &self.end_day,
            TemplateField::EndMonth => &self.end_month,
            TemplateField::EndYear => &self.end_year,
        }
    }

    /// Whether `name` is one of the configured identifiers.
    pub fn contains(&self, name: &str) -> bool {
        TemplateField::ALL.iter().any(|f| self.id(*f) == name)
    }
}

/// Batch run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Skip records whose text cannot be read instead of aborting the run.
    pub continue_on_error: bool,
}

/// Output naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name for single-record output.
    pub single_file_name: String,

    /// File name for the multi-record archive.
    pub archive_file_name: String,

    /// Prefix of each document inside the archive.
    pub entry_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            single_file_name: "filled_form.pdf".to_string(),
            archive_file_name: "filled_forms.zip".to_string(),
            entry_prefix: "filled_form".to_string(),
        }
    }
}

impl MuqeemConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_names_match_template() {
        let names = FieldNames::default();
        assert_eq!(names.id(TemplateField::FullName), "fill_5");
        assert_eq!(names.id(TemplateField::IssueDateLocation), "fill_9");
        assert_eq!(names.id(TemplateField::PoReference), "Text1");
        assert_eq!(names.id(TemplateField::EndYear), "Text7");
        assert!(names.contains("fill_11"));
        assert!(!names.contains("Signature1"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "extraction": { "blood_type": "O-" }, "form": { "field_names": { "full_name": "Name" } } }"#;
        let config: MuqeemConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.extraction.blood_type, "O-");
        assert_eq!(config.form.field_names.full_name, "Name");
        assert_eq!(config.form.field_names.nationality, "fill_6");
        assert!(config.form.need_appearances);
        assert!(!config.batch.continue_on_error);
        assert_eq!(config.output.single_file_name, "filled_form.pdf");
    }
}
