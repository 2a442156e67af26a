use serde::Deserialize;

/// Configuration baked into the bundle. Store credentials can be replaced at
/// build time through `RFP_STORE_URL` and `RFP_STORE_ANON_KEY`.
const DEFAULT_CONFIG: &str = r#"
[store]
url = "http://localhost:54321/rest/v1"
anon_key = ""

[dashboard]
page_size = 10
debounce_ms = 250
urgent_days = 7
recent_limit = 3
"#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub debounce_ms: u32,
    pub urgent_days: i64,
    pub recent_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            debounce_ms: 250,
            urgent_days: contracts::domain::a001_rfp::filter::DEFAULT_URGENT_DAYS,
            recent_limit: 3,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                url: "http://localhost:54321/rest/v1".to_string(),
                anon_key: String::new(),
            },
            dashboard: DashboardConfig::default(),
        }
    }
}

impl ConsoleConfig {
    fn with_overrides(mut self, url: Option<&str>, anon_key: Option<&str>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.store.url = url.trim().to_string();
        }
        if let Some(key) = anon_key {
            self.store.anon_key = key.trim().to_string();
        }
        self.store.url = self.store.url.trim_end_matches('/').to_string();
        self
    }

    /// Replaces out-of-range dashboard values with the defaults.
    fn sanitized(mut self) -> Self {
        let defaults = DashboardConfig::default();
        if self.dashboard.page_size == 0 {
            log::warn!("page_size must be positive, using {}", defaults.page_size);
            self.dashboard.page_size = defaults.page_size;
        }
        if self.dashboard.urgent_days < 0 {
            log::warn!("urgent_days must not be negative, using {}", defaults.urgent_days);
            self.dashboard.urgent_days = defaults.urgent_days;
        }
        if self.dashboard.recent_limit == 0 {
            log::warn!("recent_limit must be positive, using {}", defaults.recent_limit);
            self.dashboard.recent_limit = defaults.recent_limit;
        }
        self
    }
}

pub fn parse_config(contents: &str) -> Result<ConsoleConfig, toml::de::Error> {
    toml::from_str(contents)
}

fn load_from(
    contents: &str,
    url: Option<&str>,
    anon_key: Option<&str>,
) -> ConsoleConfig {
    let config = parse_config(contents).unwrap_or_else(|e| {
        log::warn!("invalid console config, using defaults: {e}");
        ConsoleConfig::default()
    });
    config.with_overrides(url, anon_key).sanitized()
}

pub fn load_config() -> ConsoleConfig {
    let config = load_from(
        DEFAULT_CONFIG,
        option_env!("RFP_STORE_URL"),
        option_env!("RFP_STORE_ANON_KEY"),
    );
    log::debug!("row store at {}", config.store.url);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.dashboard, DashboardConfig::default());
        assert_eq!(config.store.url, "http://localhost:54321/rest/v1");
    }

    #[test]
    fn test_overrides_replace_store_credentials() {
        let config = load_from(
            DEFAULT_CONFIG,
            Some("https://demo.example.co/rest/v1/"),
            Some("anon-123"),
        );
        assert_eq!(config.store.url, "https://demo.example.co/rest/v1");
        assert_eq!(config.store.anon_key, "anon-123");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let raw = r#"
[store]
url = "http://store"

[dashboard]
page_size = 0
urgent_days = -3
"#;
        let config = load_from(raw, None, None);
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.dashboard.urgent_days, 7);
        assert_eq!(config.dashboard.debounce_ms, 250);
    }

    #[test]
    fn test_unparseable_document_uses_defaults() {
        let config = load_from("[store", None, None);
        assert_eq!(config, ConsoleConfig::default());
    }
}
