//! One-page FIR report rendered from a [`ComplaintDraft`].

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use super::draft::ComplaintDraft;
use crate::error::{AppError, Result};

pub const FIR_FILE_NAME: &str = "fir.pdf";

// A4 in points; layout positions are millimetres from the top-left corner.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: f32 = 842.0;
const LEFT_MM: f32 = 20.0;
const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 12;

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Text lines with their vertical offset in millimetres.
pub fn report_lines(draft: &ComplaintDraft) -> Vec<(f32, String)> {
    vec![
        (40.0, format!("Name: {}", draft.full_name())),
        (50.0, format!("Email: {}", draft.email)),
        (60.0, format!("Phone: {}", draft.phone)),
        (70.0, format!("Address: {}", draft.address)),
        (80.0, format!("ID: {} - {}", draft.id_type, draft.id_number)),
        (100.0, "Incident Details:".to_string()),
        (110.0, format!("Date: {}", draft.incident_date)),
        (120.0, format!("Time: {}", draft.incident_time)),
        (130.0, format!("Location: {}", draft.incident_location)),
        (140.0, format!("Type: {}", draft.incident_type)),
        (150.0, format!("Description: {}", draft.incident_description)),
        (160.0, format!("Witnesses: {}", draft.witnesses)),
    ]
}

fn text_at(operations: &mut Vec<Operation>, size: i64, y_mm: f32, text: &str) {
    operations.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new(
            "Td",
            vec![
                mm_to_pt(LEFT_MM).into(),
                (PAGE_HEIGHT - mm_to_pt(y_mm)).into(),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]);
}

/// Renders the report and returns the encoded PDF bytes.
pub fn render(draft: &ComplaintDraft) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(
        dictionary! { "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica" },
    );
    let resources_id = doc.add_object(dictionary! { "Font" => dictionary! { "F1" => font_id } });

    let mut operations = Vec::new();
    text_at(&mut operations, TITLE_SIZE, 20.0, "Online FIR Report");
    for (y, line) in report_lines(draft) {
        text_at(&mut operations, BODY_SIZE, y, &line);
    }
    let content = Content { operations }
        .encode()
        .map_err(|e| AppError::Io(format!("encoding FIR content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), (PAGE_HEIGHT as i64).into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Io(format!("writing FIR pdf: {e}")))?;
    debug!(bytes = bytes.len(), "rendered FIR report");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fir::draft::IdType;

    fn shown_text(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).expect("reload pdf");
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|o| o.as_str().ok())
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect()
    }

    #[test]
    fn renders_every_line_in_order() {
        let draft = ComplaintDraft {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            id_type: IdType::Pan,
            id_number: "ABCDE1234F".into(),
            incident_location: "MG Road".into(),
            ..Default::default()
        };
        let bytes = render(&draft).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let text = shown_text(&bytes);
        assert_eq!(text.len(), 13);
        assert_eq!(text[0], "Online FIR Report");
        assert_eq!(text[1], "Name: Asha Rao");
        assert_eq!(text[5], "ID: pan - ABCDE1234F");
        assert_eq!(text[6], "Incident Details:");
        assert_eq!(text[9], "Location: MG Road");
        assert_eq!(text[10], "Type: theft");
    }

    #[test]
    fn layout_positions() {
        let ys: Vec<f32> = report_lines(&ComplaintDraft::default())
            .into_iter()
            .map(|(y, _)| y)
            .collect();
        assert_eq!(ys.first(), Some(&40.0));
        assert_eq!(ys.last(), Some(&160.0));
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }
}
