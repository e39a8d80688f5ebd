//! PDF export of persons: A4 landscape, 20 mm margins, a paginated table.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Encoding, Object, Stream};

use super::{text_or_empty, DocumentError};
use crate::application::dto::PersonResponse;

const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;

/// 20 mm in points.
const MARGIN: f32 = 56.7;

const TITLE_SIZE: f32 = 16.0;
const FONT_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 16.0;

/// Column titles and widths in points. Widths sum to the printable width.
const COLUMNS: [(&str, f32); 8] = [
    ("Person Name", 100.0),
    ("Email", 140.0),
    ("Date of Birth", 75.0),
    ("Age", 35.0),
    ("Gender", 50.0),
    ("Country", 90.0),
    ("Address", 183.0),
    ("Newsletters", 55.0),
];

/// Drawn in place of characters WinAnsi cannot represent.
const SUBSTITUTE: u8 = b'?';

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

type Row = [String; 8];

/// Render persons as a landscape PDF table.
pub fn persons_to_pdf(persons: &[PersonResponse]) -> Result<Vec<u8>, DocumentError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    };
    // Both fonts share the encoding, so one lookup covers every string.
    let encoding = font.get_font_encoding(&doc).map_err(pdf_error)?;
    let font_id = doc.add_object(font.clone());
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
            "F2" => bold_font_id,
        },
    });

    let rows: Vec<Row> = persons.iter().map(table_row).collect();
    let per_page = rows_per_page();
    let pages: Vec<&[Row]> = if rows.is_empty() {
        vec![&rows[..]]
    } else {
        rows.chunks(per_page).collect()
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (index, page_rows) in pages.iter().enumerate() {
        let content = page_content(page_rows, index == 0, &encoding);
        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0_i64.into(), 0_i64.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(pdf_error)?;
    Ok(buffer)
}

fn pdf_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Pdf(e.to_string())
}

/// Table rows that fit below the header; the first page also carries the title.
fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN - TITLE_SIZE - 2.0 * LINE_HEIGHT;
    (usable / LINE_HEIGHT).floor() as usize
}

fn table_row(person: &PersonResponse) -> Row {
    [
        text_or_empty(&person.person_name).to_string(),
        text_or_empty(&person.email).to_string(),
        person
            .date_of_birth
            .map(|dob| dob.format("%d %b %Y").to_string())
            .unwrap_or_default(),
        person.age.map(|a| a.to_string()).unwrap_or_default(),
        text_or_empty(&person.gender).to_string(),
        text_or_empty(&person.country).to_string(),
        text_or_empty(&person.address).to_string(),
        if person.receive_news_letters { "Yes" } else { "No" }.to_string(),
    ]
}

fn page_content(rows: &[Row], with_title: bool, encoding: &Encoding) -> Content {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;

    if with_title {
        let title = win_ansi(encoding, "Persons");
        push_text(&mut operations, "F2", TITLE_SIZE, MARGIN, y, title);
    }
    y -= 2.0 * LINE_HEIGHT;

    let mut x = MARGIN;
    for (title, width) in COLUMNS {
        push_text(&mut operations, "F2", FONT_SIZE, x, y, win_ansi(encoding, title));
        x += width;
    }

    for row in rows {
        y -= LINE_HEIGHT;
        let mut x = MARGIN;
        for (cell, (_, width)) in row.iter().zip(COLUMNS) {
            let text = win_ansi(encoding, &fit(cell, width));
            push_text(&mut operations, "F1", FONT_SIZE, x, y, text);
            x += width;
        }
    }

    Content { operations }
}

fn push_text(operations: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: Vec<u8>) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
    operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    operations.push(Operation::new("ET", vec![]));
}

/// Encode `text` one byte per character for the WinAnsi fonts.
fn win_ansi(encoding: &Encoding, text: &str) -> Vec<u8> {
    let mut buf = [0; 4];
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match Document::encode_text(encoding, ch.encode_utf8(&mut buf)).as_slice() {
            [byte] => bytes.push(*byte),
            _ => bytes.push(SUBSTITUTE),
        }
    }
    bytes
}

/// Truncate `text` so it stays inside a column of `width` points.
fn fit(text: &str, width: f32) -> String {
    let max_chars = ((width - 4.0) / (FONT_SIZE * GLYPH_WIDTH_RATIO)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
