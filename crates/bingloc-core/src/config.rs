use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(value)
    };

    let map_key = require("BING_MAPS_KEY")?;
    let app_id = require("BING_APP_ID")?;

    let items_per_category = parse_u32("BINGLOC_ITEMS_PER_CATEGORY", "10")?;
    let connect_timeout_secs = parse_u64("BINGLOC_CONNECT_TIMEOUT_SECS", "5")?;
    let response_timeout_secs = parse_u64("BINGLOC_RESPONSE_TIMEOUT_SECS", "10")?;

    let default_latitude = parse_f64("BINGLOC_DEFAULT_LATITUDE", "0.0")?;
    let default_longitude = parse_f64("BINGLOC_DEFAULT_LONGITUDE", "0.0")?;
    let default_zoom = parse_u8("BINGLOC_DEFAULT_ZOOM", "5")?;

    let user_agent = or_default("BINGLOC_USER_AGENT", "bingloc/0.1 (location-field)");

    Ok(AppConfig {
        map_key,
        app_id,
        items_per_category,
        connect_timeout_secs,
        response_timeout_secs,
        default_latitude,
        default_longitude,
        default_zoom,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("BING_MAPS_KEY", "test-map-key");
        m.insert("BING_APP_ID", "test-app-id");
        m
    }

    #[test]
    fn build_app_config_fails_without_map_key() {
        let mut map = full_env();
        map.remove("BING_MAPS_KEY");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BING_MAPS_KEY"),
            "expected MissingEnvVar(BING_MAPS_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_app_id() {
        let mut map = full_env();
        map.remove("BING_APP_ID");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BING_APP_ID"),
            "expected MissingEnvVar(BING_APP_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_applies_defaults() {
        let map = full_env();
        let config = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(config.items_per_category, 10);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.response_timeout_secs, 10);
        assert_eq!(config.default_latitude, 0.0);
        assert_eq!(config.default_longitude, 0.0);
        assert_eq!(config.default_zoom, 5);
        assert_eq!(config.user_agent, "bingloc/0.1 (location-field)");
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = full_env();
        map.insert("BINGLOC_ITEMS_PER_CATEGORY", "25");
        map.insert("BINGLOC_DEFAULT_LATITUDE", "47.6062");
        map.insert("BINGLOC_DEFAULT_LONGITUDE", "-122.3321");
        map.insert("BINGLOC_DEFAULT_ZOOM", "12");
        let config = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(config.items_per_category, 25);
        assert!((config.default_latitude - 47.6062).abs() < f64::EPSILON);
        assert!((config.default_longitude - -122.3321).abs() < f64::EPSILON);
        assert_eq!(config.default_zoom, 12);
    }

    #[test]
    fn build_app_config_rejects_bad_limit() {
        let mut map = full_env();
        map.insert("BINGLOC_ITEMS_PER_CATEGORY", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BINGLOC_ITEMS_PER_CATEGORY"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_finite_center() {
        let mut map = full_env();
        map.insert("BINGLOC_DEFAULT_LATITUDE", "NaN");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BINGLOC_DEFAULT_LATITUDE"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_bad_timeout() {
        let mut map = full_env();
        map.insert("BINGLOC_RESPONSE_TIMEOUT_SECS", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BINGLOC_RESPONSE_TIMEOUT_SECS"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }
}
