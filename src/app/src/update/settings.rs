use crux_core::{render::render, Command};

use crate::config::Endpoint;
use crate::events::{Event, SettingsEvent};
use crate::model::Model;
use crate::types::OrientationRequest;
use crate::{fire_and_forget, Effect};

/// Handle device settings events
pub fn handle(event: SettingsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SettingsEvent::SetOrientation { upside_down } => {
            model.menu_upside_down = upside_down;
            Command::all([
                render(),
                fire_and_forget!(
                    Settings,
                    SettingsEvent,
                    model,
                    Endpoint::Orientation,
                    OrientationApplied,
                    "Set orientation",
                    body_json: &OrientationRequest { status: upside_down }
                ),
            ])
        }

        SettingsEvent::OrientationApplied(result) => {
            if let Err(e) = result {
                log::debug!("{e}");
            }
            Command::done()
        }
    }
}
