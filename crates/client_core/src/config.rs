use tracing::warn;
use url::Url;

use crate::error::CatalogError;

pub const API_URL_ENV: &str = "CATALOG_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Base URL baked in when the crate was compiled, if `CATALOG_API_URL` was set then.
const BUILD_API_URL: Option<&str> = option_env!("CATALOG_API_URL");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: Url,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
        }
    }
}

impl ClientSettings {
    /// Runtime `CATALOG_API_URL` wins over the build-time value, which wins over the default.
    pub fn from_env() -> Self {
        let runtime = std::env::var(API_URL_ENV).ok();
        Self::resolve(runtime.as_deref(), BUILD_API_URL)
    }

    pub fn resolve(runtime: Option<&str>, build_time: Option<&str>) -> Self {
        let candidate = runtime
            .filter(|v| !v.trim().is_empty())
            .or(build_time.filter(|v| !v.trim().is_empty()));

        let Some(raw) = candidate else {
            return Self::default();
        };

        match parse_base_url(raw) {
            Ok(api_base_url) => Self { api_base_url },
            Err(error) => {
                warn!(%error, fallback = DEFAULT_API_URL, "ignoring configured API base url");
                Self::default()
            }
        }
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|err| CatalogError::InvalidBaseUrl {
        input: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CatalogError::InvalidBaseUrl {
            input: raw.to_string(),
            reason: "expected an http(s) url".to_string(),
        });
    }

    Ok(url)
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API url is valid")
}
