use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub completion_api_key: String,
    #[serde(default = "default_completion_base_url")]
    pub completion_base_url: String,
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    #[serde(default = "default_completion_temperature")]
    pub completion_temperature: f32,
    pub search_api_key: String,
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
    #[serde(default = "default_search_max_results")]
    pub search_max_results: u32,
    #[serde(default = "default_search_query_prefix")]
    pub search_query_prefix: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default)]
    pub knowledge_base_path: Option<String>,
    #[serde(default = "default_news_feed_path")]
    pub news_feed_path: String,
    #[serde(default)]
    pub expose_search_results: bool,
}

fn default_completion_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_completion_model() -> String {
    "llama-3.2-90b-vision-preview".to_string()
}

fn default_completion_temperature() -> f32 {
    0.7
}

fn default_search_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_search_max_results() -> u32 {
    5
}

fn default_search_query_prefix() -> String {
    "Ingénieur-e Au Féminin".to_string()
}

fn default_http_port() -> u16 {
    3000
}

fn default_news_feed_path() -> String {
    "./data/insta.json".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            completion_api_key: String::new(),
            completion_base_url: default_completion_base_url(),
            completion_model: default_completion_model(),
            completion_temperature: default_completion_temperature(),
            search_api_key: String::new(),
            search_base_url: default_search_base_url(),
            search_max_results: default_search_max_results(),
            search_query_prefix: default_search_query_prefix(),
            http_port: default_http_port(),
            knowledge_base_path: None,
            news_feed_path: default_news_feed_path(),
            expose_search_results: false,
        }
    }
}

impl AppConfig {
    /// Both collaborators are gated on credentials; a blank key is as bad as a missing one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion_api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "completion_api_key must be set".to_string(),
            ));
        }
        if self.search_api_key.trim().is_empty() {
            return Err(ConfigError::Message("search_api_key must be set".to_string()));
        }
        if !(0.0..=2.0).contains(&self.completion_temperature) {
            return Err(ConfigError::Message(format!(
                "completion_temperature must be within [0, 2], got {}",
                self.completion_temperature
            )));
        }
        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        self.validate().is_ok()
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    let config: AppConfig = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
