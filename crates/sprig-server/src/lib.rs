//! HTTP server for the Sprig support-chat service.

pub mod handlers;
pub mod middleware;
pub mod prompt;
pub mod server;
pub mod state;
pub mod ui;

pub use handlers::chat::FALLBACK_REPLY;
pub use middleware::rate_limit::RateLimiter;
pub use server::{create_router, run_server};
pub use state::AppState;
