// Application state (AppState)

use crate::api::client::ApiClient;
use crate::core::config::Config;
use crate::models::career::{Career, CareerPrice};
use crate::models::news::NewsItem;
use crate::models::payment::Payment;
use crate::models::user::UserRecord;
use crate::pager::controller::Pager;
use crate::session::store::SessionStore;
use std::sync::Arc;

/// Shared application state.
///
/// One pager per list view: each view owns its cursor and accumulator
/// independently, so a reset in one list never disturbs another. All fields
/// are wrapped in Arc for cheap cloning across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persisted session key-value store; the only reader/writer of the
    /// session keys.
    pub session: Arc<SessionStore>,

    /// Typed client for the upstream school API.
    pub api: Arc<ApiClient>,

    /// Admin users list.
    pub users: Arc<Pager<UserRecord>>,

    /// Admin career catalog.
    pub careers: Arc<Pager<Career>>,

    /// Price history of the career currently being inspected.
    pub career_prices: Arc<Pager<CareerPrice>>,

    /// Global payments list.
    pub payments: Arc<Pager<Payment>>,

    /// News feed, shared by the admin and student views.
    pub news: Arc<Pager<NewsItem>>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, session: SessionStore, api: ApiClient) -> Self {
        let config = Arc::new(config);
        let page_size = config.lists.page_size;

        Self {
            session: Arc::new(session),
            api: Arc::new(api),
            users: Arc::new(Pager::new(page_size)),
            careers: Arc::new(Pager::new(page_size)),
            career_prices: Arc::new(Pager::new(page_size)),
            payments: Arc::new(Pager::new(page_size)),
            news: Arc::new(Pager::new(page_size)),
            config,
        }
    }
}
