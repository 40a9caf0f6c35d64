//! Device API configuration
//!
//! The base URL is configurable; the endpoint paths are fixed by the
//! firmware. Timeout budgets are exposed to the shell, which enforces them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Base URL used when the shell does not provide one.
///
/// NOTE: `crux_http` requires absolute URLs and rejects relative paths
/// (`RelativeUrlWithoutBase` error). The shell strips this prefix before
/// sending requests via `fetch()`, making them relative to the page the
/// device served.
pub const BASE_URL: &str = "https://relative/";

pub const CONNECT_TIMEOUT_MS: u32 = 20_000;
pub const DISCONNECT_TIMEOUT_MS: u32 = 2_000;

/// Endpoints served by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Scan,
    Connect,
    Disconnect,
    Status,
    Sensor,
    Interval,
    Orientation,
    AdcThreshold,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Status => "status",
            Self::Sensor => "sensor",
            Self::Interval => "interval",
            Self::Orientation => "ledDirection",
            Self::AdcThreshold => "adc",
        }
    }
}

/// Time budgets for requests the device may never answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestTimeouts {
    pub connect_ms: u32,
    pub disconnect_ms: u32,
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self {
            connect_ms: CONNECT_TIMEOUT_MS,
            disconnect_ms: DISCONNECT_TIMEOUT_MS,
        }
    }
}

/// Where and how to reach the device API. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    base_url: String,
    timeouts: RequestTimeouts,
}

impl ApiConfig {
    /// Build a config for the given base URL.
    ///
    /// The URL must be absolute http(s). A trailing slash is added so
    /// endpoint paths resolve below it.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url.into(),
            timeouts: RequestTimeouts::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> &RequestTimeouts {
        &self.timeouts
    }

    /// Absolute URL of an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeouts: RequestTimeouts::default(),
        }
    }
}
