use crate::applications::service::ApplicationService;
use crate::config::Config;
use crate::contact::service::ContactService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both services carry their own injected store/notifier handles, so handlers
/// never touch the pool or the SMTP transport directly.
#[derive(Clone)]
pub struct AppState {
    pub applications: ApplicationService,
    pub contacts: ContactService,
    pub config: Config,
}
