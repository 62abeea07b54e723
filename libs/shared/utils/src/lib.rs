pub mod extractor;
pub mod mail;
pub mod session;
pub mod state;
pub mod test_utils;
pub mod validation;
pub mod views;

pub use state::AppState;
