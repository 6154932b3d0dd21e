/// Runtime configuration for the Bing lookup services.
///
/// Loaded from environment variables by [`crate::config::load_app_config`].
/// The two credentials serve different Bing services: `map_key` is the
/// Virtual Earth key used by the business/geocode SOAP services and the
/// REST reverse-geocode endpoint, `app_id` is the Live Search application
/// id used by the phonebook search service.
#[derive(Clone)]
pub struct AppConfig {
    pub map_key: String,
    pub app_id: String,
    /// Result limit passed to each lookup service per request.
    pub items_per_category: u32,
    pub connect_timeout_secs: u64,
    pub response_timeout_secs: u64,
    /// Map center shown before any location has been picked.
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_zoom: u8,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("map_key", &"[redacted]")
            .field("app_id", &"[redacted]")
            .field("items_per_category", &self.items_per_category)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("response_timeout_secs", &self.response_timeout_secs)
            .field("default_latitude", &self.default_latitude)
            .field("default_longitude", &self.default_longitude)
            .field("default_zoom", &self.default_zoom)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
