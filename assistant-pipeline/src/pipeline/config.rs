use common::utils::config::AppConfig;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub search_query_prefix: String,
    pub expose_search_results: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            search_query_prefix: config.search_query_prefix.clone(),
            expose_search_results: config.expose_search_results,
        }
    }
}
