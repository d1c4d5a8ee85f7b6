use crate::api::ApiClient;
use crate::config::Config;
use crate::icons::IconSet;
use crate::models::Journey;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub icons: &'static dyn IconSet,
    /// Most recently loaded journey, swapped whole on every load.
    pub current: Arc<Mutex<Option<Arc<Journey>>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        let icons = config.icon_theme.icon_set();
        Self {
            config: Arc::new(config),
            api,
            icons,
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn load_journey(&self, client_id: &str) -> Result<Arc<Journey>, crate::errors::AppError> {
        let journey = Arc::new(self.api.fetch_journey(client_id).await?);
        *self.current.lock().await = Some(Arc::clone(&journey));
        Ok(journey)
    }

    pub async fn current_journey(&self) -> Option<Arc<Journey>> {
        self.current.lock().await.clone()
    }
}
