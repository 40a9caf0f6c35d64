use crux_core::{render::render, Command};

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::events::{Event, SensorEvent};
use crate::model::Model;
use crate::types::device_api::DeviceSensorReading;
use crate::types::{AdcAdjustRequest, IntervalRequest, MeasureInterval, SensorReading, UiSection};
use crate::{fire_and_forget, silent_get, Effect};

/// Handle sensor polling and calibration events
pub fn handle(event: SensorEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SensorEvent::Poll { value_focused } => handle_poll(value_focused, model),

        SensorEvent::PollResponse {
            result,
            value_focused,
        } => handle_poll_response(result, value_focused, model),

        SensorEvent::SetInterval { interval } => match MeasureInterval::try_from(interval) {
            Ok(interval) => fire_and_forget!(
                Sensor,
                SensorEvent,
                model,
                Endpoint::Interval,
                SettingApplied,
                "Set interval",
                body_json: &IntervalRequest { interval }
            ),
            Err(code) => {
                log::warn!("ignoring unknown measure interval {code}");
                Command::done()
            }
        },

        SensorEvent::SetAdcBound { bound, value } => fire_and_forget!(
            Sensor,
            SensorEvent,
            model,
            Endpoint::AdcThreshold,
            SettingApplied,
            "Adjust ADC",
            body_json: &AdcAdjustRequest { change: bound, value }
        ),

        SensorEvent::SettingApplied(result) => {
            if let Err(e) = result {
                log::debug!("{e}");
            }
            Command::done()
        }
    }
}

fn handle_poll(value_focused: bool, model: &mut Model) -> Command<Effect, Event> {
    if model.active_section() != UiSection::SensorData || model.sensor_poll_in_flight {
        return Command::done();
    }

    model.sensor_poll_in_flight = true;

    silent_get!(
        model,
        Endpoint::Sensor,
        "Sensor readout",
        wire: DeviceSensorReading,
        map: move |result| Event::Sensor(SensorEvent::PollResponse {
            result,
            value_focused,
        })
    )
}

fn handle_poll_response(
    result: Result<SensorReading, ApiError>,
    value_focused: bool,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.sensor_poll_in_flight = false;

    let fresh = match result {
        Ok(fresh) => fresh,
        Err(e) => {
            // Polling errors are expected while the device restarts
            log::debug!("{e}");
            return Command::done();
        }
    };

    model.apply_sensor_reading(fresh, value_focused);
    render()
}
