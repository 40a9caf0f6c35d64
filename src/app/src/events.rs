use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::*;

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sent once by the shell on startup; `None` keeps the default base URL
    Initialize { base_url: Option<String> },
    Wifi(WifiEvent),
    Sensor(SensorEvent),
    Settings(SettingsEvent),
    Ui(UiEvent),
}

/// Wi-Fi association, scanning and the connect flow
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WifiEvent {
    RefreshStatus,
    Scan,
    SelectNetwork {
        ssid: String,
        secured: bool,
    },
    UpdatePassword {
        password: String,
    },
    CancelConnect,
    Connect {
        ssid: String,
        password: String,
    },
    Disconnect,
    /// Shell sends this when the budget of the pending connect/disconnect expired
    RequestTimedOut {
        request_id: u32,
    },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    StatusResponse(Result<WifiStatus, ApiError>),
    #[serde(skip)]
    ScanResponse(Result<Vec<WifiNetwork>, ApiError>),
    #[serde(skip)]
    ConnectResponse {
        request_id: u32,
        result: Result<WifiStatus, ApiError>,
    },
    #[serde(skip)]
    DisconnectResponse {
        request_id: u32,
        result: Result<WifiStatus, ApiError>,
    },
}

/// Sensor polling and calibration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SensorEvent {
    /// Shell sends this on every polling tick; `value_focused` is true while
    /// the user edits the ADC value input.
    ///
    /// The flag is sampled when the request is sent and applied to its
    /// response. Focus gained while the request is in flight is only honoured
    /// from the next tick on, so the shell should keep the tick short.
    Poll {
        value_focused: bool,
    },
    SetInterval {
        interval: u32,
    },
    SetAdcBound {
        bound: AdcBound,
        value: u32,
    },

    #[serde(skip)]
    PollResponse {
        result: Result<SensorReading, ApiError>,
        value_focused: bool,
    },
    #[serde(skip)]
    SettingApplied(Result<(), ApiError>),
}

/// Device settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    SetOrientation {
        upside_down: bool,
    },

    #[serde(skip)]
    OrientationApplied(Result<(), ApiError>),
}

/// UI-only events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SwitchSection(UiSection),
    ClearError,
    ClearInfo,
}
