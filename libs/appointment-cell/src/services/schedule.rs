use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use shared_database::{collections, DocumentStore, Filter};
use shared_utils::validation::{parse_date, required};

use crate::models::{validation, AppointmentError, ScheduleRequest, SlotStatus, SlotSuggestion};

const FIRST_HOUR: u32 = 9;
const LAST_HOUR: u32 = 16;
const MORNING_END_HOUR: u32 = 12;

/// Every half-hour slot the clinic offers, `09:00` through `16:30`.
pub fn clinic_slots() -> Vec<(u32, String)> {
    (FIRST_HOUR..=LAST_HOUR)
        .flat_map(|hour| [0, 30].map(|minute| (hour, format!("{:02}:{:02}", hour, minute))))
        .collect()
}

/// Open slots for a day, given the times already booked. Morning slots are
/// marked optimal, the rest busy.
pub fn plan_slots(booked: &HashSet<String>) -> Vec<SlotSuggestion> {
    clinic_slots()
        .into_iter()
        .filter(|(_, time)| !booked.contains(time))
        .map(|(hour, time)| SlotSuggestion {
            time,
            status: if hour < MORNING_END_HOUR { SlotStatus::Optimal } else { SlotStatus::Busy },
        })
        .collect()
}

pub struct ScheduleService {
    store: Arc<dyn DocumentStore>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn suggestions(&self, request: ScheduleRequest) -> Result<Vec<SlotSuggestion>, AppointmentError> {
        let doctor_name = required(request.doctor_name.as_deref(), "doctorName").map_err(validation)?;
        let date = required(request.date.as_deref(), "date").map_err(validation)?;
        let date = parse_date(&date, "date").map_err(validation)?.format("%Y-%m-%d").to_string();

        let filter = Filter::new().eq("doctorName", doctor_name.clone()).eq("date", date.clone());
        let booked: HashSet<String> = self
            .store
            .find(collections::APPOINTMENTS, &filter)
            .await?
            .iter()
            .filter_map(|doc| doc.get_str("time").map(str::to_string))
            .collect();

        debug!("{} has {} booked slots on {}", doctor_name, booked.len(), date);
        Ok(plan_slots(&booked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_sixteen_half_hour_slots() {
        let slots = clinic_slots();

        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().map(|(_, t)| t.as_str()), Some("09:00"));
        assert_eq!(slots.last().map(|(_, t)| t.as_str()), Some("16:30"));
    }

    #[test]
    fn booked_slots_are_skipped_and_mornings_are_optimal() {
        let booked: HashSet<String> = ["09:00".to_string(), "13:30".to_string()].into();
        let plan = plan_slots(&booked);

        assert_eq!(plan.len(), 14);
        assert!(!plan.iter().any(|s| s.time == "09:00" || s.time == "13:30"));
        assert_eq!(plan[0], SlotSuggestion { time: "09:30".to_string(), status: SlotStatus::Optimal });

        let eleven_thirty = plan.iter().find(|s| s.time == "11:30").unwrap();
        assert_eq!(eleven_thirty.status, SlotStatus::Optimal);
        let noon = plan.iter().find(|s| s.time == "12:00").unwrap();
        assert_eq!(noon.status, SlotStatus::Busy);
    }
}
