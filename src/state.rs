use std::sync::Arc;

use crate::config::Config;
use crate::email::Mailer;
use crate::rate_limit::CooldownStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    /// `None` when no usable mail transport was configured at startup.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub cooldowns: Arc<dyn CooldownStore>,
}
