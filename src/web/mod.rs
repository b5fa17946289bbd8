mod pages;
mod routes;
mod sessions;

use std::sync::Arc;

pub use routes::router;
pub use sessions::SessionStore;

use crate::{classifier::WebhookClient, config::AppConfig};

pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub classifier: Arc<WebhookClient>,
    pub config: Arc<AppConfig>,
}
