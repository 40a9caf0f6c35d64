//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - wifi: Wi-Fi association, scan results and the connect flow
//! - sensor: Sensor readings, thresholds and measure intervals
//! - ui: Sections and other presentation-facing state
//! - device_api: Wire format of the device firmware's JSON payloads

pub mod device_api;
pub mod sensor;
pub mod ui;
pub mod wifi;

pub use sensor::*;
pub use ui::*;
pub use wifi::*;
