pub mod consultation;
pub mod contact;

pub use consultation::ConsultationService;
pub use contact::ContactService;
