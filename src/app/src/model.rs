use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::types::*;

/// Application Model - the device state store.
/// Also serves as the ViewModel when serialized.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    pub api: ApiConfig,

    // Device state
    pub active_wifi: ActiveWifi,
    pub scanned_networks: Vec<WifiNetwork>,
    pub sensor: Option<SensorReading>,
    /// Display classification of `sensor`, kept in step with it
    pub signal_level: Option<SignalLevel>,
    /// Measure period configured on the device, `None` for unknown codes
    pub measure_interval_secs: Option<u64>,
    pub menu_upside_down: bool,

    // Wi-Fi connect flow
    pub wifi_session: Option<WifiSession>,
    pub wifi_request: WifiRequestState,
    pub last_wifi_request_id: u32,

    // Single-flight guard for sensor polling
    pub sensor_poll_in_flight: bool,

    // UI state
    pub active_section: UiSection,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl Model {
    pub fn active_wifi(&self) -> &ActiveWifi {
        &self.active_wifi
    }

    pub fn scanned_networks(&self) -> &[WifiNetwork] {
        &self.scanned_networks
    }

    pub fn sensor_reading(&self) -> Option<&SensorReading> {
        self.sensor.as_ref()
    }

    pub fn active_section(&self) -> UiSection {
        self.active_section
    }

    pub fn set_active_wifi(&mut self, active: ActiveWifi) {
        self.active_wifi = active;
    }

    pub fn set_scanned_networks(&mut self, networks: Vec<WifiNetwork>) {
        self.scanned_networks = networks;
    }

    pub fn set_sensor_reading(&mut self, reading: SensorReading) {
        self.sensor = Some(reading);
        self.refresh_sensor_view();
    }

    /// Take a fresh readout from the device.
    ///
    /// While the ADC value is being edited the displayed value is kept, only
    /// clamped into the new bounds.
    pub fn apply_sensor_reading(&mut self, fresh: SensorReading, value_focused: bool) {
        match self.sensor.as_mut() {
            Some(current) => current.merge(fresh, value_focused),
            None => {
                let mut reading = fresh;
                reading.clamp_adc_value();
                self.sensor = Some(reading);
            }
        }
        self.refresh_sensor_view();
    }

    fn refresh_sensor_view(&mut self) {
        self.signal_level = self.sensor.as_ref().map(SensorReading::signal_level);
        self.measure_interval_secs = self
            .sensor
            .as_ref()
            .and_then(SensorReading::measure_interval)
            .map(|interval| interval.duration().as_secs());
    }

    pub fn set_active_section(&mut self, section: UiSection) {
        self.active_section = section;
    }

    /// Start a connect flow, replacing any previous one
    pub fn begin_wifi_session(&mut self, ssid: impl Into<String>, secured: bool) {
        self.wifi_session = Some(WifiSession::new(ssid, secured));
    }

    pub fn update_wifi_session_password(&mut self, password: String) {
        if let Some(session) = self.wifi_session.as_mut() {
            session.set_password(password);
        }
    }

    pub fn clear_wifi_session(&mut self) {
        self.wifi_session = None;
    }

    /// Allocate the id of the next connect/disconnect request
    pub fn next_wifi_request_id(&mut self) -> u32 {
        self.last_wifi_request_id = self.last_wifi_request_id.wrapping_add(1);
        self.last_wifi_request_id
    }

    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.is_loading = false;
        self.error_message = Some(error.into());
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: impl Into<String>,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.info_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
