mod auth;
mod logging;

pub use auth::{require_auth, AuthPolicy};
pub use logging::request_logger;
