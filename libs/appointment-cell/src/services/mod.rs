pub mod booking;
pub mod confirmation;
pub mod mailer;
pub mod schedule;

pub use booking::BookingService;
pub use mailer::Mailer;
pub use schedule::ScheduleService;
