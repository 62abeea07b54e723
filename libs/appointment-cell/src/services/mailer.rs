use std::path::Path;
use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use tracing::{debug, info};

use shared_utils::mail::{MailError, MailTransport};

use crate::services::confirmation::attachment_name;

pub const CONFIRMATION_SUBJECT: &str = "Your MediSmart AI Appointment Confirmation";
pub const CONFIRMATION_TEXT: &str =
    "Dear Patient,\n\nPlease find your appointment details attached.\n\nThank you for choosing MediSmart AI.";

/// Sends booking confirmations from the clinic mailbox.
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    sender: Mailbox,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl Mailer {
    pub fn new(transport: Option<Arc<dyn MailTransport>>, sender: &str) -> Result<Self, MailError> {
        let transport = transport.ok_or(MailError::NotConfigured)?;

        Ok(Self {
            transport,
            sender: sender.parse()?,
        })
    }

    /// Plain-text note with the PDF attached as `appointment_<id>.pdf`.
    pub fn confirmation_message(
        &self,
        recipient: &str,
        appointment_id: &str,
        pdf: Vec<u8>,
    ) -> Result<Message, MailError> {
        let attachment = Attachment::new(attachment_name(appointment_id))
            .body(pdf, ContentType::parse("application/pdf")?);

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient.parse()?)
            .subject(CONFIRMATION_SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(CONFIRMATION_TEXT.to_string()))
                    .singlepart(attachment),
            )?;

        Ok(message)
    }

    /// Mails the confirmation PDF at `pdf_path` to the patient.
    pub async fn send_confirmation(
        &self,
        recipient: &str,
        appointment_id: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError> {
        let pdf = tokio::fs::read(pdf_path).await?;
        debug!("Mailing {} byte confirmation for {}", pdf.len(), appointment_id);

        let message = self.confirmation_message(recipient, appointment_id, pdf)?;
        self.transport.deliver(message).await?;

        info!("Confirmation for appointment {} mailed to {}", appointment_id, recipient);
        Ok(())
    }
}
