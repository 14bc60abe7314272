#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub seller_api_base_url: String,
    pub seller_request_timeout_secs: u64,
    pub seller_user_agent: String,
    pub import_chunk_size: usize,
    pub import_inter_chunk_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("seller_api_base_url", &self.seller_api_base_url)
            .field(
                "seller_request_timeout_secs",
                &self.seller_request_timeout_secs,
            )
            .field("seller_user_agent", &self.seller_user_agent)
            .field("import_chunk_size", &self.import_chunk_size)
            .field(
                "import_inter_chunk_delay_ms",
                &self.import_inter_chunk_delay_ms,
            )
            .finish()
    }
}
