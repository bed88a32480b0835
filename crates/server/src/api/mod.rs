pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod orders;
pub mod redesign;
pub mod routes;
pub mod selection;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
