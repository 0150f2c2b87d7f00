//! Recognition options for the extractor.

use serde::{Deserialize, Serialize};

/// Identifier and prefix lists that tune fact recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Base-URL prefixes stripped during canonicalization
    /// (e.g. `"http://localhost:3000"`).
    pub base_url_prefixes: Vec<String>,
    /// Identifiers whose template-literal interpolation is a base URL;
    /// stripped before the remaining literal portion is captured.
    pub base_url_idents: Vec<String>,
    /// Object names treated as HTTP client helpers (`api.get(...)`).
    pub client_objects: Vec<String>,
    /// Object names treated as route registrars (`app.get(...)`).
    pub route_objects: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            base_url_prefixes: Vec::new(),
            base_url_idents: vec![
                "API_BASE_URL".into(),
                "BASE_URL".into(),
                "API_URL".into(),
                "API_ROOT".into(),
            ],
            client_objects: vec![
                "axios".into(),
                "api".into(),
                "apiClient".into(),
                "http".into(),
                "httpClient".into(),
                "client".into(),
            ],
            route_objects: vec!["app".into(), "router".into(), "server".into()],
        }
    }
}
