//! Shared helpers for integration tests.

use chrono::NaiveDate;
use lopdf::{dictionary, Document, Object, Stream};
use muqeem_core::pdf::{Result as PdfResult, TextProvider};
use muqeem_core::ContractParameters;

/// Reads record bytes as if they were the first page's text.
pub struct PlainText;

impl TextProvider for PlainText {
    fn first_page_text(&self, data: &[u8]) -> PdfResult<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

pub fn params() -> ContractParameters {
    ContractParameters::new(
        "48992",
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

/// Serialized single-page form with one text widget per name.
pub fn form_pdf(names: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let widgets: Vec<Object> = names
        .iter()
        .map(|name| {
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(*name),
                "Rect" => vec![0.into(), 0.into(), 120.into(), 20.into()],
            })
            .into()
        })
        .collect();

    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => content_id,
        "Annots" => widgets.clone(),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => dictionary! { "Fields" => widgets },
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Every field the default configuration fills.
pub const CONTRACT_FIELDS: [&str; 14] = [
    "fill_5", "fill_6", "fill_7", "fill_8", "fill_9", "fill_10", "fill_11", "Text1", "Text2",
    "Text3", "Text4", "Text5", "Text6", "Text7",
];
