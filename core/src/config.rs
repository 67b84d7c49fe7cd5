//! Where the API lives.

use serde::Deserialize;

/// Environment variable overriding [`ClientConfig::origin`].
pub const ORIGIN_ENV: &str = "SHOP_API_ORIGIN";

/// Origin and path prefix the request helper targets.
///
/// Deserializable so hosts can embed it in their own config files; missing
/// fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port, e.g. `http://localhost:8080`.
    pub origin: String,
    /// Path prefix every endpoint is mounted under.
    pub api_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_string(),
            api_prefix: "/api".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            ..Self::default()
        }
    }

    /// Defaults, with the origin taken from `SHOP_API_ORIGIN` when it is set
    /// and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(ORIGIN_ENV) {
            Ok(origin) if !origin.trim().is_empty() => Self::new(origin.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ClientConfig = serde_json::from_str(r#"{"origin":"https://shop.example"}"#).unwrap();
        assert_eq!(cfg.origin, "https://shop.example");
        assert_eq!(cfg.api_prefix, "/api");
    }

    #[test]
    fn from_env_reads_origin() {
        std::env::set_var(ORIGIN_ENV, " https://admin.shop.test ");
        let cfg = ClientConfig::from_env();
        std::env::remove_var(ORIGIN_ENV);
        assert_eq!(cfg.origin, "https://admin.shop.test");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn new_keeps_default_prefix() {
        let cfg = ClientConfig::new("http://127.0.0.1:9000");
        assert_eq!(cfg.api_prefix, "/api");
    }
}
