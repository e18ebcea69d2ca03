mod dto;
mod error;
mod extract;
mod handlers;
mod router;

pub use dto::*;
pub use error::{ApiError, status_for};
pub use extract::{ApiJson, ApiQuery};
pub use router::{AppState, create_router};
