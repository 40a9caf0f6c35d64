use serde::{Deserialize, Serialize};

/// Top level sections of the panel; exactly one is shown at a time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UiSection {
    #[default]
    SensorData,
    WifiSettings,
    DeviceSettings,
}
