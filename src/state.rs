use std::sync::Arc;

use crate::clients::groq::GroqClient;
use crate::clients::openfda::OpenFdaClient;
use crate::clients::{LabelSource, ReasoningService, build_shared_http_client};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CabinetService, DrugSearchService, InteractionService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub drug_search: Arc<DrugSearchService>,

    pub interactions: Arc<InteractionService>,

    pub cabinet: Arc<CabinetService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let label_http = build_shared_http_client(config.label_service.request_timeout_seconds)?;
        let reasoning_http = build_shared_http_client(config.reasoning.request_timeout_seconds)?;

        let labels: Arc<dyn LabelSource> = Arc::new(OpenFdaClient::with_shared_client(
            label_http,
            &config.label_service,
        ));
        let reasoning: Arc<dyn ReasoningService> = Arc::new(GroqClient::with_shared_client(
            reasoning_http,
            &config.reasoning,
        ));

        Ok(Self::with_clients(config, store, labels, reasoning))
    }

    /// Wires services around already constructed dependencies.
    #[must_use]
    pub fn with_clients(
        config: Config,
        store: Store,
        labels: Arc<dyn LabelSource>,
        reasoning: Arc<dyn ReasoningService>,
    ) -> Self {
        let drug_search = Arc::new(DrugSearchService::new(
            store.clone(),
            labels,
            reasoning.clone(),
            config.cache_ttl(),
            config.reasoning.max_label_chars,
        ));
        let interactions = Arc::new(InteractionService::new(store.clone(), reasoning));
        let cabinet = Arc::new(CabinetService::new(store.clone()));

        Self {
            config: Arc::new(config),
            store,
            drug_search,
            interactions,
            cabinet,
        }
    }
}
