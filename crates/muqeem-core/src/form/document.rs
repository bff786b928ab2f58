//! Fillable PDF documents backed by lopdf.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use tracing::{debug, trace};

use crate::error::{FormError, PdfError};

/// `/Ff` bit marking a field read-only.
const READ_ONLY: i64 = 1;

/// Upper bound on `/Parent` chains, guarding against reference cycles.
const MAX_FIELD_DEPTH: usize = 32;

/// A widget annotation bound to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    /// Page number (1-indexed).
    pub page: u32,
    /// The widget annotation object.
    pub widget_id: ObjectId,
    /// The terminal field holding `/T` and `/V`. Equals `widget_id` for
    /// merged field/widget dictionaries.
    pub field_id: ObjectId,
    /// Fully qualified field name.
    pub name: String,
}

/// Immutable blueprint of the fillable form.
///
/// Every record is filled on its own [`FormDocument`] obtained from
/// [`Template::instantiate`]; the blueprint itself is never written to.
#[derive(Debug, Clone)]
pub struct Template {
    document: Document,
}

impl Template {
    /// Load a template from bytes.
    pub fn load(data: &[u8]) -> Result<Self, PdfError> {
        Ok(Self {
            document: load_document(data)?,
        })
    }

    /// Wrap an already parsed document.
    pub fn from_document(mut document: Document) -> Self {
        promote_inline_annotations(&mut document);
        Self { document }
    }

    /// A fresh working copy.
    pub fn instantiate(&self) -> FormDocument {
        FormDocument {
            document: self.document.clone(),
        }
    }

    /// Number of pages in the template.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Names of every widget-backed field, in page order, without repeats.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (page, page_id) in self.document.get_pages() {
            for widget in collect_widgets(&self.document, page, page_id) {
                if !names.contains(&widget.name) {
                    names.push(widget.name);
                }
            }
        }
        names
    }
}

/// Working copy of a fillable form.
#[derive(Debug, Clone)]
pub struct FormDocument {
    document: Document,
}

impl FormDocument {
    /// Load a form document from bytes.
    pub fn load(data: &[u8]) -> Result<Self, PdfError> {
        Ok(Self {
            document: load_document(data)?,
        })
    }

    /// Page numbers and their object ids, in page order.
    pub fn pages(&self) -> Vec<(u32, ObjectId)> {
        self.document.get_pages().into_iter().collect()
    }

    /// Widgets annotated on a page. Entries that cannot be resolved are skipped.
    pub fn widgets(&self, page: u32, page_id: ObjectId) -> Vec<Widget> {
        collect_widgets(&self.document, page, page_id)
    }

    /// Current value of the named field, if it is set.
    pub fn field_value(&self, name: &str) -> Option<String> {
        self.pages()
            .into_iter()
            .flat_map(|(page, page_id)| self.widgets(page, page_id))
            .find(|w| w.name == name)
            .and_then(|w| {
                let field = self.document.get_dictionary(w.field_id).ok()?;
                field.get(b"V").ok().and_then(decode_text)
            })
    }

    /// Write `value` into the field behind `widget` and drop the widget's
    /// stale appearance stream.
    pub fn set_widget_value(&mut self, widget: &Widget, value: &str) -> Result<(), FormError> {
        let field_type = inherited(&self.document, widget.field_id, b"FT")
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned());

        match field_type.as_deref() {
            Some("Tx") | Some("Ch") => {}
            Some(other) => return Err(FormError::UnsupportedFieldType(other.to_string())),
            None => return Err(FormError::Malformed("no /FT on field or its parents".to_string())),
        }

        let flags = inherited(&self.document, widget.field_id, b"Ff")
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        if flags & READ_ONLY != 0 {
            return Err(FormError::ReadOnly);
        }

        let field = self
            .document
            .get_object_mut(widget.field_id)
            .and_then(|o| o.as_dict_mut())
            .map_err(|_| FormError::MissingObject(widget.field_id.0, widget.field_id.1))?;
        field.set("V", encode_text(value));

        let annot = self
            .document
            .get_object_mut(widget.widget_id)
            .and_then(|o| o.as_dict_mut())
            .map_err(|_| FormError::MissingObject(widget.widget_id.0, widget.widget_id.1))?;
        annot.remove(b"AP");

        trace!("Set {} = {:?}", widget.name, value);
        Ok(())
    }

    /// Raise `/NeedAppearances` on the document's AcroForm, if it has one.
    pub fn set_need_appearances(&mut self) -> Result<(), FormError> {
        let root_id = self
            .document
            .trailer
            .get(b"Root")
            .and_then(|o| o.as_reference())
            .map_err(|e| FormError::Malformed(format!("trailer /Root: {}", e)))?;

        let acro_form = self
            .document
            .get_dictionary(root_id)
            .map_err(|_| FormError::MissingObject(root_id.0, root_id.1))?
            .get(b"AcroForm")
            .ok()
            .cloned();

        let acro_dict: &mut Dictionary = match acro_form {
            Some(Object::Reference(id)) => self
                .document
                .get_object_mut(id)
                .and_then(|o| o.as_dict_mut())
                .map_err(|_| FormError::MissingObject(id.0, id.1))?,
            Some(Object::Dictionary(_)) => self
                .document
                .get_object_mut(root_id)
                .and_then(|o| o.as_dict_mut())
                .and_then(|catalog| catalog.get_mut(b"AcroForm"))
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| FormError::Malformed(format!("/AcroForm: {}", e)))?,
            _ => {
                debug!("Document has no AcroForm, leaving appearances alone");
                return Ok(());
            }
        };

        acro_dict.set("NeedAppearances", true);
        Ok(())
    }

    /// Serialize the document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PdfError> {
        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| PdfError::Save(e.to_string()))?;
        Ok(buffer)
    }
}

fn load_document(data: &[u8]) -> Result<Document, PdfError> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
    if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted form with empty password");
    }
    promote_inline_annotations(&mut doc);
    Ok(doc)
}

/// Move annotation dictionaries written inline in `/Annots` into indirect
/// objects so their widgets can be addressed by id. Returns how many moved.
fn promote_inline_annotations(doc: &mut Document) -> usize {
    let mut promoted = 0;

    for (_, page_id) in doc.get_pages() {
        let (array_id, annots) = match doc.get_dictionary(page_id).and_then(|p| p.get(b"Annots")) {
            Ok(Object::Array(arr)) => (None, arr.clone()),
            Ok(Object::Reference(id)) => match doc.get_object(*id) {
                Ok(Object::Array(arr)) => (Some(*id), arr.clone()),
                _ => continue,
            },
            _ => continue,
        };
        if !annots.iter().any(|o| matches!(o, Object::Dictionary(_))) {
            continue;
        }

        let entries: Vec<Object> = annots
            .into_iter()
            .map(|entry| match entry {
                Object::Dictionary(dict) => {
                    promoted += 1;
                    Object::Reference(doc.add_object(dict))
                }
                other => other,
            })
            .collect();

        match array_id {
            Some(id) => {
                doc.objects.insert(id, Object::Array(entries));
            }
            None => {
                if let Ok(page) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
                    page.set("Annots", entries);
                }
            }
        }
    }

    if promoted > 0 {
        debug!("Promoted {} inline annotations to indirect objects", promoted);
    }
    promoted
}

fn collect_widgets(doc: &Document, page: u32, page_id: ObjectId) -> Vec<Widget> {
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    // /Annots may be a direct array or an indirect reference
    let annots = match page_dict.get(b"Annots") {
        Ok(obj) => match doc.dereference(obj) {
            Ok((_, Object::Array(arr))) => arr,
            _ => return Vec::new(),
        },
        Err(_) => return Vec::new(),
    };

    let mut widgets = Vec::new();
    for entry in annots {
        let Object::Reference(widget_id) = entry else {
            debug!("Skipping unaddressable annotation on page {}", page);
            continue;
        };
        let Ok(annot) = doc.get_dictionary(*widget_id) else {
            continue;
        };

        let is_widget = matches!(annot.get(b"Subtype").and_then(|o| o.as_name()), Ok(name) if name == b"Widget");
        if !is_widget {
            continue;
        }

        match qualified_name(doc, *widget_id) {
            Some((field_id, name)) => widgets.push(Widget {
                page,
                widget_id: *widget_id,
                field_id,
                name,
            }),
            None => trace!("Widget {:?} on page {} has no field name", widget_id, page),
        }
    }

    widgets
}

/// Terminal field id and fully qualified name for a widget.
fn qualified_name(doc: &Document, widget_id: ObjectId) -> Option<(ObjectId, String)> {
    let mut parts = Vec::new();
    let mut field_id = None;
    let mut current = widget_id;

    for _ in 0..MAX_FIELD_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Some(partial) = dict.get(b"T").ok().and_then(decode_text) {
            field_id.get_or_insert(current);
            parts.push(partial);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => break,
        }
    }

    parts.reverse();
    field_id.map(|id| (id, parts.join(".")))
}

/// Look up an inheritable field attribute on the field or its ancestors.
fn inherited<'a>(doc: &'a Document, field_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = field_id;
    for _ in 0..MAX_FIELD_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
    None
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8, or Latin-1).
fn decode_text(obj: &Object) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        match std::str::from_utf8(bytes) {
            Ok(s) => Some(s.to_string()),
            Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// Encode text as a PDF string: literal for ASCII, UTF-16BE otherwise.
fn encode_text(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
