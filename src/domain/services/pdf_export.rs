use crate::domain::models::report::Report;
use crate::error::AppError;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PAGE_HEIGHT_PT: f32 = PAGE_HEIGHT_MM * 72.0 / 25.4;
const MARGIN_PT: f32 = 50.0;
const FONT_SIZE: f32 = 10.0;
const LINE_STEP_PT: f32 = 14.0;
const WRAP_COLUMNS: usize = 95;
const SUMMARY_LIMIT: usize = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub bold: bool,
}

impl PdfLine {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: false }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), bold: true }
    }

    fn blank() -> Self {
        Self::plain("")
    }
}

/// Maps Unicode hyphen variants to `-` and drops anything the built-in
/// Helvetica encoding cannot render.
pub fn sanitize_for_pdf(text: &str) -> String {
    text.chars()
        .map(|c| if ('\u{2010}'..='\u{2015}').contains(&c) { '-' } else { c })
        .filter(|c| matches!(c, '\x20'..='\x7e' | '\n'))
        .collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunks = chars.chunks(columns).map(|c| c.iter().collect::<String>()).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        lines.push(chunk);
                    } else {
                        current = chunk;
                    }
                }
                continue;
            }
            if !current.is_empty() && current.chars().count() + 1 + chars.len() > columns {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

fn push_text(lines: &mut Vec<PdfLine>, text: &str) {
    let safe = sanitize_for_pdf(text);
    lines.extend(wrap(&safe, WRAP_COLUMNS).into_iter().map(PdfLine::plain));
}

/// Section layout of the one-page report summary.
pub fn layout_report(report: &Report) -> Vec<PdfLine> {
    let mut lines = vec![PdfLine::bold("OBDscribe Report"), PdfLine::blank()];

    let mut vehicle = format!("Vehicle: {} {} {}", report.vehicle_year, report.vehicle_make, report.vehicle_model);
    if let Some(trim) = report.vehicle_trim.as_deref().filter(|t| !t.is_empty()) {
        vehicle.push(' ');
        vehicle.push_str(trim);
    }
    push_text(&mut lines, &vehicle);
    if let Some(mileage) = report.mileage {
        push_text(&mut lines, &format!("Mileage: {}", mileage));
    }
    push_text(&mut lines, &format!("Created: {}", report.created_at.format("%Y-%m-%d %H:%M UTC")));
    lines.push(PdfLine::blank());

    lines.push(PdfLine::bold("Complaint:"));
    push_text(&mut lines, if report.complaint.is_empty() { "(none)" } else { &report.complaint });
    lines.push(PdfLine::blank());

    if !report.notes.is_empty() {
        lines.push(PdfLine::bold("Notes:"));
        push_text(&mut lines, &report.notes);
        lines.push(PdfLine::blank());
    }

    if !report.codes_raw.is_empty() {
        lines.push(PdfLine::bold("OBD Codes:"));
        push_text(&mut lines, &report.codes_raw);
        lines.push(PdfLine::blank());
    }

    if !report.tech_view.is_empty() {
        lines.push(PdfLine::bold("Tech View (summary):"));
        push_text(&mut lines, &truncate_chars(&report.tech_view, SUMMARY_LIMIT));
        lines.push(PdfLine::blank());
    }

    if !report.customer_view.is_empty() {
        lines.push(PdfLine::bold("Customer View (summary):"));
        push_text(&mut lines, &truncate_chars(&report.customer_view, SUMMARY_LIMIT));
    }

    lines
}

pub fn render_report_pdf(report: &Report) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new("OBDscribe Report", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");

    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
    let canvas = doc.get_page(page).get_layer(layer);

    let mut y = PAGE_HEIGHT_PT - MARGIN_PT;
    for line in layout_report(report) {
        if y < MARGIN_PT {
            break;
        }
        if !line.text.is_empty() {
            let used = if line.bold { &font_bold } else { &font };
            canvas.use_text(line.text, FONT_SIZE, pt_to_mm(MARGIN_PT), pt_to_mm(y), used);
        }
        y -= LINE_STEP_PT;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalWithMsg(format!("PDF rendering failed: {}", e))
}
