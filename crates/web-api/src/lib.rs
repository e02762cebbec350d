pub mod handlers;
pub mod server;

pub use handlers::{CalendarParams, ClassifyRequest, HealthResponse, NewsParams, ScoreRequest};
pub use server::ApiServer;
