use crux_core::{render::render, Command};

use crate::events::{Event, UiEvent, WifiEvent};
use crate::model::Model;
use crate::types::UiSection;
use crate::{update_field, Effect};

/// Handle UI-related events
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::SwitchSection(section) => {
            model.set_active_section(section);
            match section {
                UiSection::WifiSettings => super::wifi::handle(WifiEvent::RefreshStatus, model),
                _ => render(),
            }
        }
        UiEvent::ClearError => update_field!(model.error_message, None),
        UiEvent::ClearInfo => update_field!(model.info_message, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_to_wifi_refreshes_status() {
        let mut model = Model::default();

        let _ = handle(UiEvent::SwitchSection(UiSection::WifiSettings), &mut model);

        assert_eq!(model.active_section, UiSection::WifiSettings);
        assert!(model.is_loading);
    }

    #[test]
    fn switching_elsewhere_only_changes_section() {
        let mut model = Model::default();

        let _ = handle(UiEvent::SwitchSection(UiSection::DeviceSettings), &mut model);

        assert_eq!(model.active_section, UiSection::DeviceSettings);
        assert!(!model.is_loading);
    }

    #[test]
    fn clear_error_and_info() {
        let mut model = Model {
            error_message: Some("error".to_string()),
            info_message: Some("info".to_string()),
            ..Default::default()
        };

        let _ = handle(UiEvent::ClearError, &mut model);
        let _ = handle(UiEvent::ClearInfo, &mut model);

        assert!(model.error_message.is_none());
        assert!(model.info_message.is_none());
    }
}
