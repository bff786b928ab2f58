//! End-to-end runs over in-memory forms.

mod common;

use std::io::Cursor;

use muqeem_core::{
    package, BatchRunner, FormDocument, MuqeemConfig, MuqeemError, Package, RecordInput, RunMode,
    RunStatus, Template,
};
use pretty_assertions::assert_eq;

use common::{form_pdf, params, PlainText, CONTRACT_FIELDS};

const MUQEEM_TEXT: &str = "Name JOHN SMITH Birth Date 1990-05-01\n\
    Nationality India\n\
    Passport Information Number Z7654321\n\
    Issue Date 2018-06-30 Expiry Date 2028-06-29\n\
    Issue Location NEW DELHI Iqama Information\n\
    Iqama Number 2345678901";

fn contract_template() -> Template {
    let mut names = CONTRACT_FIELDS.to_vec();
    names.push("Remarks");
    Template::load(&form_pdf(&names)).unwrap()
}

#[test]
fn fills_every_contract_field() {
    let runner = BatchRunner::new().with_provider(PlainText);
    let records = vec![RecordInput::new("smith.pdf", MUQEEM_TEXT.as_bytes().to_vec())];

    let outcome = runner.run(&contract_template(), &records, &params()).unwrap();
    assert_eq!(outcome.status(), RunStatus::Success);

    let filled = &outcome.outputs[0];
    assert!(filled.report.is_clean());
    assert_eq!(filled.report.filled.len(), CONTRACT_FIELDS.len());
    assert_eq!(filled.report.untouched, vec!["Remarks"]);

    let form = FormDocument::load(&filled.data).unwrap();
    let value = |name: &str| form.field_value(name).unwrap_or_default();

    assert_eq!(value("fill_5"), "JOHN SMITH");
    assert_eq!(value("fill_6"), "India");
    assert_eq!(value("fill_7"), "2345678901");
    assert_eq!(value("fill_8"), "Z7654321");
    assert_eq!(value("fill_9"), "2018-06-30 - NEW DELHI");
    assert_eq!(value("fill_10"), "1990-05-01");
    assert_eq!(value("fill_11"), "B+");
    assert_eq!(value("Text1"), "48992");

    let dates: Vec<String> = ["Text2", "Text3", "Text4", "Text5", "Text6", "Text7"]
        .iter()
        .map(|name| value(*name))
        .collect();
    assert_eq!(dates, vec!["05", "01", "2024", "31", "12", "2024"]);
    assert_eq!(form.field_value("Remarks"), None);
}

#[test]
fn sparse_record_writes_defaults() {
    let runner = BatchRunner::new().with_provider(PlainText);
    let records = vec![RecordInput::new(
        "sparse.pdf",
        b"Name JOHN SMITH Gender Male\nIqama Number 42".to_vec(),
    )];

    let outcome = runner.run(&contract_template(), &records, &params()).unwrap();
    let form = FormDocument::load(&outcome.outputs[0].data).unwrap();

    assert_eq!(form.field_value("fill_9").as_deref(), Some("Not found - Not found"));
    assert_eq!(form.field_value("fill_8").as_deref(), Some("Not found"));
    assert_eq!(form.field_value("fill_6").as_deref(), Some(""));
}

#[test]
fn batch_archive_skips_invalid_records() {
    let runner = BatchRunner::new().with_provider(PlainText);
    let records = vec![
        RecordInput::new("smith.pdf", MUQEEM_TEXT.as_bytes().to_vec()),
        RecordInput::new("no-iqama.pdf", b"Name JANE DOE Nationality Kenya".to_vec()),
        RecordInput::new(
            "doe.pdf",
            b"Translated Name JANE DOE Nationality Kenya\nIqama Number 2999999999".to_vec(),
        ),
    ];

    let outcome = runner.run(&contract_template(), &records, &params()).unwrap();
    assert_eq!(outcome.status(), RunStatus::PartialSkips);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].record_id, "no-iqama.pdf");

    let package = package(outcome, RunMode::Multi, &MuqeemConfig::default().output).unwrap();
    let Package::Archive { data, .. } = package else {
        panic!("expected an archive");
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["filled_form_001_2345678901.pdf", "filled_form_003_2999999999.pdf"]
    );
}

#[test]
fn all_invalid_records_yield_no_output() {
    let runner = BatchRunner::new().with_provider(PlainText);
    let records = vec![
        RecordInput::new("a.pdf", b"Nationality India".to_vec()),
        RecordInput::new("b.pdf", Vec::new()),
    ];

    let outcome = runner.run(&contract_template(), &records, &params()).unwrap();
    assert_eq!(outcome.status(), RunStatus::NoOutput);
    assert_eq!(outcome.skipped.len(), 2);

    let result = package(outcome, RunMode::Multi, &MuqeemConfig::default().output);
    assert!(matches!(result, Err(MuqeemError::NoOutput)));
}

#[test]
fn configured_field_names_and_blood_type() {
    let mut config = MuqeemConfig::default();
    config.extraction.blood_type = "A-".to_string();
    config.form.field_names.blood_type = "blood".to_string();

    let runner = BatchRunner::from_config(&config).with_provider(PlainText);
    let template = Template::load(&form_pdf(&["blood", "fill_11"])).unwrap();
    let records = vec![RecordInput::new("smith.pdf", MUQEEM_TEXT.as_bytes().to_vec())];

    let outcome = runner.run(&template, &records, &params()).unwrap();
    let form = FormDocument::load(&outcome.outputs[0].data).unwrap();

    assert_eq!(form.field_value("blood").as_deref(), Some("A-"));
    assert_eq!(form.field_value("fill_11"), None);
}
