use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_database::{collections, DocumentStore, Filter};
use shared_models::auth::CurrentUser;
use shared_utils::mail::MailTransport;
use shared_utils::validation::{optional, parse_date, parse_time, required};
use shared_utils::AppState;

use crate::models::{
    validation, Appointment, AppointmentError, AppointmentType, BookAppointmentRequest, BookingOutcome,
};
use crate::services::confirmation::write_confirmation;
use crate::services::mailer::Mailer;

/// Checks the request and builds the appointment for `patient`. Date and time
/// are stored in their canonical `YYYY-MM-DD` / `HH:MM` forms.
pub fn build_appointment(
    patient: &CurrentUser,
    request: BookAppointmentRequest,
) -> Result<Appointment, AppointmentError> {
    let doctor_name = required(request.doctor_name.as_deref(), "doctorName").map_err(validation)?;
    let date = required(request.date.as_deref(), "date").map_err(validation)?;
    let time = required(request.time.as_deref(), "time").map_err(validation)?;
    let appointment_type = required(request.appointment_type.as_deref(), "appointmentType")
        .map_err(validation)?
        .parse::<AppointmentType>()?;

    let date = parse_date(&date, "date").map_err(validation)?;
    let time = parse_time(&time, "time").map_err(validation)?;

    Ok(Appointment {
        id: String::new(),
        patient_id: patient.id.clone(),
        patient_name: patient.name.clone(),
        patient_email: patient.email.clone(),
        doctor_name,
        date: date.format("%Y-%m-%d").to_string(),
        time: time.format("%H:%M").to_string(),
        appointment_type,
        additional_notes: optional(request.additional_notes.as_deref()),
        hospital_name: optional(request.hospital_name.as_deref()),
        hospital_location: optional(request.hospital_location.as_deref()),
        created_at: Utc::now().to_rfc3339(),
    })
}

pub struct BookingService {
    store: Arc<dyn DocumentStore>,
    mail: Option<Arc<dyn MailTransport>>,
    sender: String,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            mail: state.mail.clone(),
            sender: state.config.mail_sender.clone(),
        }
    }

    /// Persists the appointment, then renders and mails the confirmation.
    /// A failed confirmation does not undo the booking.
    pub async fn book(
        &self,
        patient: &CurrentUser,
        request: BookAppointmentRequest,
    ) -> Result<BookingOutcome, AppointmentError> {
        let mut appointment = build_appointment(patient, request)?;
        debug!(
            "Booking {} with {} on {} at {}",
            patient.id, appointment.doctor_name, appointment.date, appointment.time
        );

        let doc = self
            .store
            .insert(collections::APPOINTMENTS, serde_json::to_value(&appointment)?)
            .await?;
        appointment.id = doc.id;
        info!("Appointment {} booked for patient {}", appointment.id, patient.id);

        let confirmation_sent = match self.send_confirmation(&appointment).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Confirmation for appointment {} not sent: {}", appointment.id, e);
                false
            }
        };

        Ok(BookingOutcome { appointment, confirmation_sent })
    }

    async fn send_confirmation(&self, appointment: &Appointment) -> Result<(), AppointmentError> {
        let file = write_confirmation(appointment)?;

        let sent = match Mailer::new(self.mail.clone(), &self.sender) {
            Ok(mailer) => {
                mailer
                    .send_confirmation(&appointment.patient_email, &appointment.id, file.path())
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = file.close() {
            warn!("Could not remove confirmation file for {}: {}", appointment.id, e);
        }

        sent.map_err(AppointmentError::from)
    }

    /// Patients see their own bookings; doctors see bookings made under
    /// their name.
    pub async fn appointments_for(&self, user: &CurrentUser) -> Result<Vec<Value>, AppointmentError> {
        let filter = if user.is_doctor() {
            Filter::new().eq("doctorName", user.name.clone())
        } else {
            Filter::new().eq("patientId", user.id.clone())
        };

        let docs = self.store.find(collections::APPOINTMENTS, &filter).await?;
        debug!("Found {} appointments for {}", docs.len(), user.id);

        Ok(docs.iter().map(|doc| doc.to_json()).collect())
    }

    pub async fn cancel(&self, user: &CurrentUser, appointment_id: &str) -> Result<(), AppointmentError> {
        let doc = self
            .store
            .find_by_id(collections::APPOINTMENTS, appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let is_patient = doc.get_str("patientId") == Some(user.id.as_str());
        let is_doctor = user.is_doctor() && doc.get_str("doctorName") == Some(user.name.as_str());

        if !is_patient && !is_doctor {
            warn!("User {} may not cancel appointment {}", user.id, appointment_id);
            return Err(AppointmentError::Unauthorized);
        }

        if !self.store.delete_by_id(collections::APPOINTMENTS, appointment_id).await? {
            return Err(AppointmentError::NotFound);
        }

        info!("Appointment {} cancelled by {}", appointment_id, user.id);
        Ok(())
    }
}
