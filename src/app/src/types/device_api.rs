//! Wire format of the JSON payloads served by the device firmware.
//!
//! The firmware is not consistent about number encoding (the sensor endpoint
//! sends every value as a string) and reports signal strength through an
//! unclamped RSSI mapping. These types absorb that and convert into the
//! domain types via `From`.

use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

use crate::types::{ActiveWifi, SensorReading, WifiNetwork, WifiStatus};

/// Accept a number either as JSON number or as decimal string
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    <T as FromStr>::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => {
            T::try_from(n).map_err(|_| de::Error::custom(format!("number {n} out of range")))
        }
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Map the firmware's signal percentage into 0-100
fn clamp_signal(signal: i32) -> u8 {
    signal.clamp(0, 100) as u8
}

/// Scan result entry
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeviceWifiNetwork {
    pub ssid: String,
    pub channel: u8,
    pub signal: i32,
    pub secured: bool,
}

impl From<DeviceWifiNetwork> for WifiNetwork {
    fn from(dev: DeviceWifiNetwork) -> Self {
        Self {
            ssid: dev.ssid,
            channel: dev.channel,
            signal: clamp_signal(dev.signal),
            secured: dev.secured,
        }
    }
}

/// Association details nested in status/connect/disconnect responses
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceWifiInfo {
    pub ssid: String,
    pub ip: Option<String>,
    pub channel: Option<u8>,
    pub signal: i32,
    pub secured: bool,
}

impl From<DeviceWifiInfo> for ActiveWifi {
    fn from(dev: DeviceWifiInfo) -> Self {
        Self {
            ssid: Some(dev.ssid),
            signal: clamp_signal(dev.signal),
            channel: dev.channel,
            secured: dev.secured,
            ip: dev.ip.filter(|ip| !ip.is_empty()),
        }
    }
}

/// Response of the status, connect and disconnect endpoints
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceWifiStatus {
    pub connected: bool,
    pub wifi: Option<DeviceWifiInfo>,
    pub menu_upside_down: Option<bool>,
}

impl From<DeviceWifiStatus> for WifiStatus {
    fn from(dev: DeviceWifiStatus) -> Self {
        let active = match dev.wifi {
            Some(wifi) if dev.connected && !wifi.ssid.is_empty() => wifi.into(),
            _ => ActiveWifi::disconnected(),
        };

        Self {
            connected: active.is_connected(),
            active,
            menu_upside_down: dev.menu_upside_down,
        }
    }
}

/// Response of the sensor endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSensorReading {
    #[serde(deserialize_with = "number_or_string")]
    pub value: u8,
    #[serde(deserialize_with = "number_or_string")]
    pub adc_value: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub adc_min: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub adc_max: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub interval: u32,
}

impl From<DeviceSensorReading> for SensorReading {
    fn from(dev: DeviceSensorReading) -> Self {
        Self {
            raw_value: dev.value,
            adc_value: dev.adc_value,
            adc_min: dev.adc_min,
            adc_max: dev.adc_max,
            interval_seconds: dev.interval,
        }
    }
}
