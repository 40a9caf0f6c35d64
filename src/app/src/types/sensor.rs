use serde::{Deserialize, Serialize};
use serde_repr::Serialize_repr;
use std::time::Duration;

/// Latest sensor readout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Discretized level shown as digits
    pub raw_value: u8,
    pub adc_value: u32,
    pub adc_min: u32,
    pub adc_max: u32,
    /// Measure interval code as stored on the device
    pub interval_seconds: u32,
}

impl SensorReading {
    /// Merge a fresh readout into this one.
    ///
    /// While the user edits the ADC input (`value_focused`) the displayed ADC
    /// value is kept; everything else follows the device.
    pub fn merge(&mut self, fresh: SensorReading, value_focused: bool) {
        let adc_value = if value_focused {
            self.adc_value
        } else {
            fresh.adc_value
        };

        *self = Self { adc_value, ..fresh };
        self.clamp_adc_value();
    }

    /// Keep `adc_value` within the calibrated bounds
    pub fn clamp_adc_value(&mut self) {
        if self.adc_min <= self.adc_max {
            self.adc_value = self.adc_value.clamp(self.adc_min, self.adc_max);
        }
    }

    pub fn signal_level(&self) -> SignalLevel {
        SignalLevel::from_level(self.raw_value)
    }

    pub fn measure_interval(&self) -> Option<MeasureInterval> {
        MeasureInterval::try_from(self.interval_seconds).ok()
    }
}

/// Visual classification of the sensor level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SignalLevel {
    Alert,
    Low,
    Medium,
    High,
}

impl SignalLevel {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Alert,
            1 => Self::Low,
            2..=3 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Which calibration bound an ADC adjustment targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdcBound {
    Min,
    Max,
}

/// Request body of the threshold-adjust endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdcAdjustRequest {
    pub change: AdcBound,
    pub value: u32,
}

/// Measure intervals selectable on the device, keyed by their wire code
#[derive(Debug, Clone, Copy, Serialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum MeasureInterval {
    FourHours = 1,
    OneHour = 2,
    ThirtyMinutes = 3,
    FiveMinutes = 4,
    ThirtySeconds = 5,
    Continuous = 6,
}

impl MeasureInterval {
    pub fn duration(self) -> Duration {
        match self {
            Self::FourHours => Duration::from_secs(4 * 60 * 60),
            Self::OneHour => Duration::from_secs(60 * 60),
            Self::ThirtyMinutes => Duration::from_secs(30 * 60),
            Self::FiveMinutes => Duration::from_secs(5 * 60),
            Self::ThirtySeconds => Duration::from_secs(30),
            Self::Continuous => Duration::from_secs(1),
        }
    }
}

impl TryFrom<u32> for MeasureInterval {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::FourHours),
            2 => Ok(Self::OneHour),
            3 => Ok(Self::ThirtyMinutes),
            4 => Ok(Self::FiveMinutes),
            5 => Ok(Self::ThirtySeconds),
            6 => Ok(Self::Continuous),
            other => Err(other),
        }
    }
}

/// Request body of the interval endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntervalRequest {
    pub interval: MeasureInterval,
}

/// Request body of the orientation-toggle endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrientationRequest {
    pub status: bool,
}
