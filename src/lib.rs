use std::sync::Arc;
use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{limiter, store, utils, web};

use limiter::rate_limiter::RateLimiter;
use repositories::content_store::ContentStore;
use use_cases::contact::ContactHandler;

pub type SharedContentStore = Arc<dyn ContentStore>;
pub type AppContactHandler = ContactHandler<SharedContentStore>;

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub rate_limiter: RateLimiter,
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// `store` is `None` when content store credentials are absent; the
    /// contact pipeline then runs in dev mode and persists nothing.
    pub fn new(config: &settings::AppConfig, store: Option<SharedContentStore>) -> Self {
        AppState {
            contact_handler: ContactHandler::new(store),
            rate_limiter: RateLimiter::new(
                config.rate_limit_max_requests,
                Duration::from_secs(config.rate_limit_window_secs),
            ),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}
