use std::io::{BufWriter, Write};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::models::{Appointment, AppointmentError};

pub const CONFIRMATION_TITLE: &str = "MediSmart AI - Appointment Confirmation";

/// Attachment name the patient sees in their inbox.
pub fn attachment_name(appointment_id: &str) -> String {
    format!("appointment_{}.pdf", appointment_id)
}

/// The labelled lines printed under the title, in order.
pub fn detail_lines(appointment: &Appointment) -> Vec<String> {
    let mut lines = vec![
        format!("Patient: {}", appointment.patient_name),
        format!("Doctor: {}", appointment.doctor_name),
        format!("Date: {}", appointment.date),
        format!("Time: {}", appointment.time),
        format!("Type: {}", appointment.appointment_type),
    ];

    if let Some(location) = appointment.location() {
        lines.push(format!("Location: {}", location));
    }

    lines
}

fn pdf_error(e: impl std::fmt::Display) -> AppointmentError {
    AppointmentError::Confirmation(format!("PDF error: {e}"))
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP: f32 = 280.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// A line of text placed on a page, `y` in millimetres from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub bold: bool,
}

struct Pager {
    pages: Vec<Vec<PlacedLine>>,
    y: f32,
}

impl Pager {
    fn new() -> Self {
        Self { pages: vec![Vec::new()], y: TOP }
    }

    /// Places a line at the cursor and advances it by `step`. Starts a new
    /// page when the line would fall below the bottom margin.
    fn place(&mut self, text: String, size: f32, x: f32, bold: bool, step: f32) {
        if self.y < BOTTOM_MARGIN {
            self.pages.push(Vec::new());
            self.y = TOP;
        }

        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine { text, size, x, y: self.y, bold });
        }
        self.y -= step;
    }

    fn skip(&mut self, gap: f32) {
        self.y -= gap;
    }
}

/// Lays the confirmation out on as many A4 pages as the notes need.
pub fn layout(appointment: &Appointment) -> Vec<Vec<PlacedLine>> {
    let mut pager = Pager::new();

    pager.place(CONFIRMATION_TITLE.to_string(), 16.0, 45.0, true, 16.0);

    for line in detail_lines(appointment) {
        pager.place(line, 12.0, 20.0, false, 8.0);
    }

    pager.skip(5.0);
    let notes = format!("Notes: {}", appointment.additional_notes.as_deref().unwrap_or("N/A"));
    for line in wrap_text(&notes, 85) {
        pager.place(line, 12.0, 20.0, false, 6.0);
    }

    pager.pages
}

/// Renders the A4 confirmation. Returns PDF bytes.
pub fn render_confirmation(appointment: &Appointment) -> Result<Vec<u8>, AppointmentError> {
    let (doc, page1, layer1) =
        PdfDocument::new(CONFIRMATION_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    for (number, lines) in layout(appointment).into_iter().enumerate() {
        let (page, layer) = if number == 0 {
            (page1, layer1)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", number + 1))
        };
        let layer = doc.get_page(page).get_layer(layer);

        for line in lines {
            let face = if line.bold { &bold } else { &font };
            layer.use_text(line.text, line.size, Mm(line.x), Mm(line.y), face);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(pdf_error)?;
    buf.into_inner().map_err(pdf_error)
}

/// Writes the confirmation to a temporary file that is removed when the
/// handle is closed or dropped.
pub fn write_confirmation(appointment: &Appointment) -> Result<NamedTempFile, AppointmentError> {
    let bytes = render_confirmation(appointment)?;

    let mut file = tempfile::Builder::new()
        .prefix(&format!("appointment_{}_", appointment.id))
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| AppointmentError::Confirmation(format!("temp file error: {e}")))?;

    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| AppointmentError::Confirmation(format!("temp file error: {e}")))?;

    debug!("Confirmation for {} written to {}", appointment.id, file.path().display());
    Ok(file)
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;

    fn appointment(kind: AppointmentType, notes: Option<&str>) -> Appointment {
        Appointment {
            id: "a-42".to_string(),
            patient_id: "p-1".to_string(),
            patient_name: "Ravi Kumar".to_string(),
            patient_email: "ravi@example.com".to_string(),
            doctor_name: "Meera Iyer".to_string(),
            date: "2026-11-02".to_string(),
            time: "10:30".to_string(),
            appointment_type: kind,
            additional_notes: notes.map(str::to_string),
            hospital_name: Some("City Care".to_string()),
            hospital_location: None,
            created_at: "2026-10-18T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_confirmation(&appointment(AppointmentType::Online, Some("Bring old reports"))).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn location_line_only_for_offline() {
        let offline = detail_lines(&appointment(AppointmentType::Offline, None));
        assert_eq!(offline.last().map(String::as_str), Some("Location: City Care"));

        let online = detail_lines(&appointment(AppointmentType::Online, None));
        assert!(!online.iter().any(|l| l.starts_with("Location")));
        assert_eq!(online[0], "Patient: Ravi Kumar");
    }

    #[test]
    fn temp_file_is_removed_on_close() {
        let file = write_confirmation(&appointment(AppointmentType::Online, None)).unwrap();
        let path = file.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));

        file.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn long_notes_continue_on_another_page() {
        let notes = vec!["symptom"; 800].join(" ");
        let booked = appointment(AppointmentType::Offline, Some(notes.as_str()));

        let pages = layout(&booked);
        assert!(pages.len() > 1);
        for line in pages.iter().flatten() {
            assert!(line.y >= BOTTOM_MARGIN, "{} placed at {}mm", line.text, line.y);
        }

        let placed: usize = pages.iter().map(Vec::len).sum();
        let expected = 1 + detail_lines(&booked).len() + wrap_text(&format!("Notes: {}", notes), 85).len();
        assert_eq!(placed, expected);
        assert_eq!(pages[1][0].y, TOP);

        let bytes = render_confirmation(&booked).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn short_confirmation_fits_one_page() {
        let pages = layout(&appointment(AppointmentType::Online, Some("Bring old reports")));

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].text, CONFIRMATION_TITLE);
        assert!(pages[0][0].bold);
        assert_eq!(pages[0].last().map(|l| l.text.as_str()), Some("Notes: Bring old reports"));
    }

    #[test]
    fn long_notes_wrap() {
        let lines = wrap_text("one two three four five six", 10);
        assert_eq!(lines, vec!["one two", "three four", "five six"]);
        assert_eq!(attachment_name("a-42"), "appointment_a-42.pdf");
    }
}
