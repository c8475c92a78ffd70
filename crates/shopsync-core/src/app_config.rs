#[derive(Clone)]
pub struct AppConfig {
    pub store_handle: String,
    pub api_version: String,
    pub access_token: String,
    pub database_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_attempts: u32,
    pub retry_delay_secs: u64,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Base URL of the store's Admin REST API, e.g.
    /// `https://my-store.myshopify.com/admin/api/2024-04`.
    #[must_use]
    pub fn admin_base_url(&self) -> String {
        format!(
            "https://{}.myshopify.com/admin/api/{}",
            self.store_handle, self.api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_handle", &self.store_handle)
            .field("api_version", &self.api_version)
            .field("access_token", &"[redacted]")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_attempts", &self.fetch_max_attempts)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
