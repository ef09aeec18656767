#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub serpapi_api_key: String,
    pub serpapi_base_url: Option<String>,
    pub search_engine: String,
    pub mistral_api_key: String,
    pub mistral_base_url: Option<String>,
    pub mistral_model: String,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("serpapi_api_key", &"[redacted]")
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("search_engine", &self.search_engine)
            .field("mistral_api_key", &"[redacted]")
            .field("mistral_base_url", &self.mistral_base_url)
            .field("mistral_model", &self.mistral_model)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
