use super::fonts::Font;
use crate::pagination::{Page, PageSetup};
use crate::story::DocumentInfo;
use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const PRODUCER: &str = concat!("epub2pdf ", env!("CARGO_PKG_VERSION"));

/// Assemble the page list into a PDF document.
pub fn build_document(pages: &[Page], setup: &PageSetup, info: &DocumentInfo) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(setup.width),
        Object::Real(setup.height),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for (idx, page) in pages.iter().enumerate() {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .with_context(|| format!("Failed to encode content stream for page {}", idx + 1))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(pages.len() as i64),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut info_dict = dictionary! {
        "Producer" => text_string(PRODUCER),
    };
    if let Some(title) = &info.title {
        info_dict.set("Title", text_string(title));
    }
    if let Some(author) = &info.author {
        info_dict.set("Author", text_string(author));
    }
    let info_id = doc.add_object(info_dict);
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    Ok(doc)
}

/// Write `doc` to `out`, removing any partial file if saving fails.
pub fn save_document(doc: &mut Document, out: &Path) -> Result<()> {
    if let Err(err) = doc.save(out) {
        if out.exists() {
            if let Err(rm_err) = fs::remove_file(out) {
                warn!(path = %out.display(), "Failed to remove partial PDF: {rm_err}");
            }
        }
        return Err(err).with_context(|| format!("Failed to write PDF to {}", out.display()));
    }
    debug!(path = %out.display(), "Saved PDF");
    Ok(())
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.lines.len() * 6);
    for line in &page.lines {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![line.font.resource_name().into(), Object::Real(line.size)],
        ));
        ops.push(Operation::new("Tw", vec![Object::Real(line.word_spacing)]));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.clone())],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, lopdf::StringFormat::Hexadecimal)
}
