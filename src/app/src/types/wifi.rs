use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::cmp::Reverse;

/// Minimum WPA2 passphrase length accepted by the connect form
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// A network found by a scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WifiNetwork {
    pub ssid: String,
    pub channel: u8,
    /// Signal quality in percent (0-100)
    pub signal: u8,
    pub secured: bool,
}

/// The network the device is currently associated with.
///
/// `ssid == None` means the device is not connected to any network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWifi {
    pub ssid: Option<String>,
    pub signal: u8,
    pub channel: Option<u8>,
    pub secured: bool,
    pub ip: Option<String>,
}

impl ActiveWifi {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.ssid.is_some()
    }

    pub fn is_ssid(&self, ssid: &str) -> bool {
        self.ssid.as_deref() == Some(ssid)
    }
}

/// Device Wi-Fi state as reported by the status, connect and disconnect endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WifiStatus {
    pub connected: bool,
    pub active: ActiveWifi,
    /// Only reported by the status endpoint
    pub menu_upside_down: Option<bool>,
}

/// User entry state while joining a network
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WifiSession {
    pub target_ssid: String,
    pub password: String,
    pub secured: bool,
    /// Whether the connect button may be enabled
    pub can_submit: bool,
}

impl WifiSession {
    pub fn new(target_ssid: impl Into<String>, secured: bool) -> Self {
        Self {
            target_ssid: target_ssid.into(),
            password: String::new(),
            secured,
            can_submit: !secured,
        }
    }

    pub fn set_password(&mut self, password: String) {
        self.can_submit = !self.secured || password.chars().count() >= MIN_PASSPHRASE_LEN;
        self.password = password;
    }
}

/// Connect/disconnect request currently awaiting an answer from the device.
///
/// At most one is pending. The shell arms a timer with `timeout_ms` for every
/// new `request_id` and sends `WifiEvent::RequestTimedOut { request_id }`
/// when it expires; timeouts for any other id are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WifiRequestState {
    #[default]
    Idle,
    Connecting {
        request_id: u32,
        ssid: String,
        timeout_ms: u32,
    },
    Disconnecting {
        request_id: u32,
        timeout_ms: u32,
    },
}

impl WifiRequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn request_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Connecting { request_id, .. } | Self::Disconnecting { request_id, .. } => {
                Some(*request_id)
            }
        }
    }

    /// Whether `request_id` names the connect that is still pending
    pub fn is_connecting(&self, request_id: u32) -> bool {
        matches!(self, Self::Connecting { request_id: id, .. } if *id == request_id)
    }

    /// Whether `request_id` names the disconnect that is still pending
    pub fn is_disconnecting(&self, request_id: u32) -> bool {
        matches!(self, Self::Disconnecting { request_id: id, .. } if *id == request_id)
    }
}

/// Request body of the connect endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ConnectRequest {
    #[validate(min_length = 1)]
    pub ssid: String,
    pub password: String,
}

/// Order scan results for display: the active network first, then by signal.
///
/// Networks broadcasting the same SSID from several access points are
/// collapsed into the strongest one.
pub fn sort_networks(networks: Vec<WifiNetwork>, active: &ActiveWifi) -> Vec<WifiNetwork> {
    let mut unique: Vec<WifiNetwork> = Vec::with_capacity(networks.len());

    for network in networks {
        match unique.iter_mut().find(|n| n.ssid == network.ssid) {
            Some(existing) if existing.signal < network.signal => *existing = network,
            Some(_) => {}
            None => unique.push(network),
        }
    }

    unique.sort_by_key(|n| (Reverse(active.is_ssid(&n.ssid)), Reverse(n.signal)));
    unique
}
