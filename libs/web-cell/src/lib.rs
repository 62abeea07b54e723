pub mod handlers;
pub mod router;

pub use router::web_routes;
