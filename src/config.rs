//! Process configuration.
//!
//! Settings come from `HPOAPI_*` environment variables with sensible
//! defaults; command line flags may override individual fields at startup.

use std::env;
use std::path::PathBuf;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use crate::{Error, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Path to the JSON ontology dump. `None` starts with an empty store.
    pub data_file: Option<PathBuf>,
    /// Allowed CORS origins; `*` or empty means any origin.
    pub cors_origins: Vec<String>,
    pub cors_methods: Vec<String>,
    pub cors_headers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: None,
            cors_origins: vec!["*".to_string()],
            cors_methods: vec!["GET".to_string(), "POST".to_string()],
            cors_headers: vec![],
        }
    }
}

fn list_var(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

impl Settings {
    /// Reads settings from the environment.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let port = match env::var("HPOAPI_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::msg(format!("invalid HPOAPI_PORT value `{raw}`")))?,
            Err(_) => defaults.port,
        };
        Ok(Self {
            host: env::var("HPOAPI_HOST").unwrap_or(defaults.host),
            port,
            data_file: env::var("HPOAPI_DATA_FILE").ok().map(PathBuf::from),
            cors_origins: list_var("HPOAPI_CORS_ORIGINS").unwrap_or(defaults.cors_origins),
            cors_methods: list_var("HPOAPI_CORS_METHODS").unwrap_or(defaults.cors_methods),
            cors_headers: list_var("HPOAPI_CORS_HEADERS").unwrap_or(defaults.cors_headers),
        })
    }

    /// Builds the CORS middleware from the configured lists.
    ///
    /// Credentials are only allowed with an explicit origin list; a wildcard
    /// origin with credentials is rejected by browsers anyway.
    pub fn cors(&self) -> Result<CorsLayer> {
        let mut layer = CorsLayer::new();

        let any_origin =
            self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*");
        if any_origin {
            layer = layer.allow_origin(Any);
            if self.cors_headers.is_empty() {
                layer = layer.allow_headers(Any);
            }
        } else {
            let origins = self
                .cors_origins
                .iter()
                .map(|origin| {
                    origin.parse::<HeaderValue>().map_err(|_| {
                        Error::msg(format!("invalid CORS origin `{origin}`"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            layer = layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true);
            // A wildcard header list is invalid alongside credentials;
            // mirror the preflight request instead.
            if self.cors_headers.is_empty() {
                layer = layer.allow_headers(AllowHeaders::mirror_request());
            }
        }

        let methods = self
            .cors_methods
            .iter()
            .map(|method| {
                method.parse::<Method>().map_err(|_| {
                    Error::msg(format!("invalid CORS method `{method}`"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_methods(methods);

        if !self.cors_headers.is_empty() {
            let headers = self
                .cors_headers
                .iter()
                .map(|header| {
                    header.parse::<HeaderName>().map_err(|_| {
                        Error::msg(format!("invalid CORS header `{header}`"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            layer = layer.allow_headers(headers);
        }

        Ok(layer)
    }
}
