mod sensor;
mod settings;
mod ui;
mod wifi;

use crux_core::{render::render, Command};

use crate::config::ApiConfig;
use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize { base_url } => initialize(base_url, model),
        Event::Wifi(wifi_event) => wifi::handle(wifi_event, model),
        Event::Sensor(sensor_event) => sensor::handle(sensor_event, model),
        Event::Settings(settings_event) => settings::handle(settings_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}

fn initialize(base_url: Option<String>, model: &mut Model) -> Command<Effect, Event> {
    let Some(base_url) = base_url else {
        model.api = ApiConfig::default();
        return render();
    };

    match ApiConfig::new(&base_url) {
        Ok(api) => {
            log::info!("device API at {}", api.base_url());
            model.api = api;
            render()
        }
        Err(e) => {
            log::error!("keeping default device API: {e}");
            model.set_error_and_render(format!("Invalid device address: {e}"))
        }
    }
}
