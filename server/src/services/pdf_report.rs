//! Plain-text report layout and PDF serialization.
//!
//! Text is wrapped first, then the wrapped lines are paginated. A4 portrait,
//! 50pt margins, 14pt line pitch, 72 columns.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::GatewayError;

pub const PAGE_WIDTH: i64 = 595;
pub const PAGE_HEIGHT: i64 = 842;
pub const MARGIN: i64 = 50;
pub const LINE_PITCH: i64 = 14;
pub const WRAP_COLUMNS: usize = 72;
pub const FONT_SIZE: i64 = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub x: i64,
    pub y: i64,
    pub text: String,
}

pub type Page = Vec<PlacedLine>;

/// Greedy wrap: each line breaks at the last space within `width` columns,
/// or hard-breaks a word longer than `width`.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut rest: Vec<char> = paragraph.trim_end().chars().collect();
        if rest.is_empty() {
            lines.push(String::new());
            continue;
        }

        while rest.len() > width {
            let window = &rest[..=width];
            let (line_end, next_start) = match window.iter().rposition(|c| *c == ' ') {
                Some(space) if space > 0 => (space, space + 1),
                _ => (width, width),
            };
            let line: String = rest[..line_end].iter().collect();
            lines.push(line.trim_end().to_string());
            rest.drain(..next_start);
            while rest.first() == Some(&' ') {
                rest.remove(0);
            }
        }

        if !rest.is_empty() {
            lines.push(rest.iter().collect());
        }
    }

    lines
}

/// Places wrapped lines top-down, opening a page when the cursor drops
/// below the bottom margin.
pub fn paginate(lines: &[String]) -> Vec<Page> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = vec![Page::new()];
    let mut y = top;

    for line in lines {
        if y < MARGIN {
            pages.push(Page::new());
            y = top;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                x: MARGIN,
                y,
                text: line.clone(),
            });
        }
        y -= LINE_PITCH;
    }

    pages
}

pub fn layout(text: &str) -> Vec<Page> {
    paginate(&wrap_text(&to_win_ansi(text), WRAP_COLUMNS))
}

/// Maps typographic punctuation to ASCII; other non-ASCII becomes `?`.
fn to_win_ansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2022}' => '*',
            '\u{00A0}' | '\t' => ' ',
            '\u{2026}' => '.',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::with_capacity(page.len() * 5);
    for line in page {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::Integer(FONT_SIZE)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(line.x), Object::Integer(line.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Serializes laid-out pages into a PDF document.
pub fn render_pdf(pages: &[Page]) -> Result<Vec<u8>, GatewayError> {
    let pdf_error = |err: lopdf::Error| GatewayError::Internal(format!("PDF generation failed: {err}"));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page).encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| GatewayError::Internal(format!("PDF generation failed: {err}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_last_space_within_width() {
        let text = "aaaa bbbb cccc dddd";
        assert_eq!(wrap_text(text, 9), vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(wrap_text(text, 10), vec!["aaaa bbbb", "cccc dddd"]);
        assert_eq!(wrap_text(text, 14), vec!["aaaa bbbb cccc", "dddd"]);
    }

    #[test]
    fn no_wrapped_line_exceeds_width() {
        let text = "The facility segregated plastic, paper and metal waste streams \
                    throughout the reporting period with contamination rates trending down \
                    as operators adopted colour-coded bins at every collection point.";
        let lines = wrap_text(text, WRAP_COLUMNS);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= WRAP_COLUMNS));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn long_words_are_hard_broken() {
        let word = "x".repeat(150);
        let lines = wrap_text(&word, WRAP_COLUMNS);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 72);
        assert_eq!(lines[1].len(), 72);
        assert_eq!(lines[2].len(), 6);
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(wrap_text("one\n\ntwo", 72), vec!["one", "", "two"]);
    }

    #[test]
    fn a_full_page_holds_54_lines() {
        let lines: Vec<String> = (0..54).map(|n| format!("line {n}")).collect();
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].first().map(|l| l.y), Some(792));
        assert_eq!(pages[0].last().map(|l| l.y), Some(MARGIN));

        let lines: Vec<String> = (0..55).map(|n| format!("line {n}")).collect();
        let pages = paginate(&lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1][0].y, 792);
    }

    #[test]
    fn long_reports_span_pages_within_margins() {
        let paragraph = "Segregation at source improved across all five sites this quarter. ";
        let text = paragraph.repeat(80);
        let pages = layout(&text);
        assert!(pages.len() > 1);
        for line in pages.iter().flatten() {
            assert!(line.x >= MARGIN);
            assert!(line.y >= MARGIN);
            assert!(line.y <= PAGE_HEIGHT - MARGIN);
            assert!(line.text.chars().count() <= WRAP_COLUMNS);
        }
    }

    #[test]
    fn rendered_document_has_one_pdf_page_per_layout_page() {
        let text = "Recovered material volumes grew steadily. ".repeat(120);
        let pages = layout(&text);
        let bytes = render_pdf(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
        assert!(pages.len() > 1);
    }

    #[test]
    fn typographic_punctuation_is_transliterated() {
        assert_eq!(to_win_ansi("“Clean” — it’s done…"), "\"Clean\" - it's done.");
        assert_eq!(to_win_ansi("CO₂"), "CO?");
    }
}
