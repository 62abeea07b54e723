pub mod health_records;
pub mod medications;

pub use health_records::HealthRecordService;
pub use medications::MedicationService;
