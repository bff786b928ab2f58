//! Mapping of extracted records and contract parameters onto template fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::config::FieldNames;
use crate::models::{ContractParameters, SourceRecord};

/// Target fields of the contract form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateField {
    FullName,
    Nationality,
    IqamaNumber,
    PassportNumber,
    /// Passport issue date and location in one field.
    IssueDateLocation,
    BirthDate,
    BloodType,
    PoReference,
    StartDay,
    StartMonth,
    StartYear,
    EndDay,
    EndMonth,
    EndYear,
}

impl TemplateField {
    /// Every target field, in form order.
    pub const ALL: [TemplateField; 14] = [
        Self::FullName,
        Self::Nationality,
        Self::IqamaNumber,
        Self::PassportNumber,
        Self::IssueDateLocation,
        Self::BirthDate,
        Self::BloodType,
        Self::PoReference,
        Self::StartDay,
        Self::StartMonth,
        Self::StartYear,
        Self::EndDay,
        Self::EndMonth,
        Self::EndYear,
    ];
}

/// Template field name → value, for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateFieldMap {
    values: BTreeMap<String, String>,
}

impl TemplateFieldMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }
}

/// Builds [`TemplateFieldMap`]s against a set of template field names.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    names: FieldNames,
}

impl FieldMapper {
    pub fn new(names: FieldNames) -> Self {
        Self { names }
    }

    /// Map a record and the run's parameters onto every target field.
    ///
    /// Expects a record that passed [`SourceRecord::is_valid`]; absent values
    /// are written as empty strings regardless.
    pub fn map(&self, record: &SourceRecord, params: &ContractParameters) -> TemplateFieldMap {
        let start = params.start();
        let end = params.end();
        let mut map = TemplateFieldMap::default();

        for field in TemplateField::ALL {
            let value = match field {
                TemplateField::FullName => record.name.clone().unwrap_or_default(),
                TemplateField::Nationality => record.nationality.clone().unwrap_or_default(),
                TemplateField::IqamaNumber => record.iqama_number.clone().unwrap_or_default(),
                TemplateField::PassportNumber => record.passport_number.clone(),
                TemplateField::IssueDateLocation => record.issue_summary(),
                TemplateField::BirthDate => record.birth_date.clone(),
                TemplateField::BloodType => record.blood_type.clone(),
                TemplateField::PoReference => params.po_reference.clone(),
                TemplateField::StartDay => start.day.clone(),
                TemplateField::StartMonth => start.month.clone(),
                TemplateField::StartYear => start.year.clone(),
                TemplateField::EndDay => end.day.clone(),
                TemplateField::EndMonth => end.month.clone(),
                TemplateField::EndYear => end.year.clone(),
            };
            map.insert(self.names.id(field), value);
        }

        map
    }
}

/// Map with the default template field names.
pub fn map_fields(record: &SourceRecord, params: &ContractParameters) -> TemplateFieldMap {
    FieldMapper::default().map(record, params)
}
