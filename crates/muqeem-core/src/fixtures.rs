//! In-memory fillable templates for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

pub(crate) struct TemplateBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_annots: Vec<Vec<Object>>,
    fields: Vec<Object>,
}

impl TemplateBuilder {
    pub(crate) fn new(page_count: usize) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_annots: vec![Vec::new(); page_count],
            fields: Vec::new(),
        }
    }

    /// Merged field/widget text field.
    pub(crate) fn text_field(self, page: usize, name: &str) -> Self {
        self.field(page, name, "Tx", 0)
    }

    /// Merged field/widget with an explicit type and flags.
    pub(crate) fn field(mut self, page: usize, name: &str, field_type: &str, flags: i64) -> Self {
        let id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => field_type,
            "Ff" => flags,
            "T" => Object::string_literal(name),
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            "AP" => dictionary! {},
        });
        self.page_annots[page - 1].push(id.into());
        self.fields.push(id.into());
        self
    }

    /// Text field that already holds a value and an appearance stream.
    pub(crate) fn prefilled_field(mut self, page: usize, name: &str, value: &str) -> Self {
        let appearance = self.doc.add_object(Stream::new(dictionary! {}, b"/Tx BMC EMC".to_vec()));
        let id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "V" => Object::string_literal(value),
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
            "AP" => dictionary! { "N" => appearance },
        });
        self.page_annots[page - 1].push(id.into());
        self.fields.push(id.into());
        self
    }

    /// Text field whose widget dictionary sits directly in the page's `/Annots`.
    pub(crate) fn inline_field(mut self, page: usize, name: &str) -> Self {
        self.page_annots[page - 1].push(Object::Dictionary(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
        }));
        self
    }

    /// Text field nested under a named group, with a separate widget kid.
    pub(crate) fn kid_field(mut self, page: usize, group: &str, name: &str) -> Self {
        let group_id = self.doc.new_object_id();
        let field_id = self.doc.new_object_id();
        let widget_id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Parent" => field_id,
            "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
        });
        self.doc.objects.insert(
            field_id,
            Object::Dictionary(dictionary! {
                "FT" => "Tx",
                "T" => Object::string_literal(name),
                "Parent" => group_id,
                "Kids" => vec![widget_id.into()],
            }),
        );
        self.doc.objects.insert(
            group_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal(group),
                "Kids" => vec![field_id.into()],
            }),
        );
        self.page_annots[page - 1].push(widget_id.into());
        self.fields.push(group_id.into());
        self
    }

    /// Non-widget annotation, which population must ignore.
    pub(crate) fn link(mut self, page: usize) -> Self {
        let id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "T" => Object::string_literal("fill_5"),
            "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
        });
        self.page_annots[page - 1].push(id.into());
        self
    }

    pub(crate) fn build(mut self) -> Document {
        let mut kids = Vec::new();
        let annots = std::mem::take(&mut self.page_annots);
        for annots in annots {
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Contents" => content_id,
                "Annots" => annots,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let acro_form_id = self.doc.add_object(dictionary! {
            "Fields" => std::mem::take(&mut self.fields),
        });
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
            "AcroForm" => acro_form_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }

}

/// Serialized PDF with one Helvetica text line per entry, one page per slice.
pub(crate) fn text_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 750.into()]),
        ];
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
