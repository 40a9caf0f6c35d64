use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::config::Endpoint;
use crate::error::ApiError;
use crate::events::{Event, WifiEvent};
use crate::model::Model;
use crate::types::device_api::{DeviceWifiNetwork, DeviceWifiStatus};
use crate::types::{sort_networks, ConnectRequest, WifiNetwork, WifiRequestState, WifiStatus};
use crate::{device_get, device_post, update_field, Effect};

pub const TRY_AGAIN: &str = "Oops! Something went wrong. Please try again.";
pub const CREDENTIALS_REJECTED: &str = "Connection failed. Please check your input.";
pub const CONNECTION_INTERRUPTED: &str = "The connection was interrupted. Please try again.";
pub const CONNECTION_ERROR: &str = "Connection error. Please check the password.";
pub const RECONNECT_ACCESS_POINT: &str = "The device was disconnected from the Wi-Fi network. \
     You can close this page and connect to the device's access point \"Sensor\".";

/// Scan results as served by the device
#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceScanResult(Vec<DeviceWifiNetwork>);

impl From<DeviceScanResult> for Vec<WifiNetwork> {
    fn from(scan: DeviceScanResult) -> Self {
        scan.0.into_iter().map(Into::into).collect()
    }
}

/// Handle Wi-Fi related events
pub fn handle(event: WifiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WifiEvent::RefreshStatus => device_get!(
            model,
            Endpoint::Status,
            "Wifi status",
            wire: DeviceWifiStatus,
            map: |result| Event::Wifi(WifiEvent::StatusResponse(result))
        ),

        WifiEvent::StatusResponse(result) => handle_status_response(result, model),

        WifiEvent::Scan => device_get!(
            model,
            Endpoint::Scan,
            "Scan",
            wire: DeviceScanResult,
            map: |result| Event::Wifi(WifiEvent::ScanResponse(result))
        ),

        WifiEvent::ScanResponse(result) => handle_scan_response(result, model),

        WifiEvent::SelectNetwork { ssid, secured } => {
            model.begin_wifi_session(ssid.clone(), secured);
            model.clear_error();
            if secured {
                // Password entry happens in the shell
                render()
            } else {
                handle_connect(ssid, String::new(), model)
            }
        }

        WifiEvent::UpdatePassword { password } => {
            model.update_wifi_session_password(password);
            render()
        }

        WifiEvent::CancelConnect => update_field!(
            model.wifi_session, None;
            model.error_message, None
        ),

        WifiEvent::Connect { ssid, password } => handle_connect(ssid, password, model),

        WifiEvent::ConnectResponse { request_id, result } => {
            handle_connect_response(request_id, result, model)
        }

        WifiEvent::Disconnect => handle_disconnect(model),

        WifiEvent::DisconnectResponse { request_id, result } => {
            handle_disconnect_response(request_id, result, model)
        }

        WifiEvent::RequestTimedOut { request_id } => handle_request_timeout(request_id, model),
    }
}

fn handle_status_response(
    result: Result<WifiStatus, ApiError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.stop_loading();

    match result {
        Ok(status) => {
            if let Some(upside_down) = status.menu_upside_down {
                model.menu_upside_down = upside_down;
            }
            set_active_and_resort(status, model);
        }
        Err(e) => {
            log::warn!("{e}");
            model.set_error(TRY_AGAIN);
        }
    }

    render()
}

fn handle_scan_response(
    result: Result<Vec<WifiNetwork>, ApiError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.stop_loading();

    match result {
        Ok(networks) => {
            let sorted = sort_networks(networks, model.active_wifi());
            model.set_scanned_networks(sorted);
        }
        Err(e) => {
            log::warn!("{e}");
            model.set_error(TRY_AGAIN);
        }
    }

    render()
}

fn handle_connect(ssid: String, password: String, model: &mut Model) -> Command<Effect, Event> {
    let request = ConnectRequest { ssid, password };

    if let Err(e) = request.validate() {
        return model.set_error_and_render(format!("Invalid network selection: {e}"));
    }

    if let Some(pending) = model.wifi_request.request_id() {
        log::warn!("refusing connect to {} while request {pending} is pending", request.ssid);
        return Command::done();
    }

    let request_id = model.next_wifi_request_id();
    model.wifi_request = WifiRequestState::Connecting {
        request_id,
        ssid: request.ssid.clone(),
        timeout_ms: model.api.timeouts().connect_ms,
    };

    device_post!(
        model,
        Endpoint::Connect,
        "Connect",
        body_json: &request,
        wire: DeviceWifiStatus,
        map: move |result| Event::Wifi(WifiEvent::ConnectResponse { request_id, result })
    )
}

fn handle_connect_response(
    request_id: u32,
    result: Result<WifiStatus, ApiError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !model.wifi_request.is_connecting(request_id) {
        log::warn!("ignoring stale connect response {request_id}: {result:?}");
        return Command::done();
    }

    model.wifi_request = WifiRequestState::Idle;
    model.stop_loading();

    match result {
        Ok(status) if status.connected => {
            model.clear_error();
            model.clear_wifi_session();
            set_active_and_resort(status, model);
        }
        Ok(_) => model.set_error(CREDENTIALS_REJECTED),
        Err(e) if e.is_timeout() => model.set_error(CONNECTION_INTERRUPTED),
        Err(e) => {
            log::warn!("{e}");
            model.set_error(CONNECTION_ERROR);
        }
    }

    render()
}

fn handle_disconnect(model: &mut Model) -> Command<Effect, Event> {
    if let Some(pending) = model.wifi_request.request_id() {
        log::warn!("refusing disconnect while request {pending} is pending");
        return Command::done();
    }

    let request_id = model.next_wifi_request_id();
    model.wifi_request = WifiRequestState::Disconnecting {
        request_id,
        timeout_ms: model.api.timeouts().disconnect_ms,
    };

    device_get!(
        model,
        Endpoint::Disconnect,
        "Disconnect",
        wire: DeviceWifiStatus,
        map: move |result| Event::Wifi(WifiEvent::DisconnectResponse { request_id, result })
    )
}

fn handle_disconnect_response(
    request_id: u32,
    result: Result<WifiStatus, ApiError>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !model.wifi_request.is_disconnecting(request_id) {
        log::warn!("ignoring stale disconnect response {request_id}: {result:?}");
        return Command::done();
    }

    model.wifi_request = WifiRequestState::Idle;
    model.stop_loading();

    match result {
        Ok(status) => set_active_and_resort(status, model),
        Err(e) => {
            // The device usually drops its own access point before answering
            log::info!("disconnect without answer, assuming success: {e}");
            mark_disconnected(model);
        }
    }

    render()
}

fn handle_request_timeout(request_id: u32, model: &mut Model) -> Command<Effect, Event> {
    if model.wifi_request.request_id() != Some(request_id) {
        log::debug!("ignoring timer of finished request {request_id}");
        return Command::done();
    }

    match std::mem::take(&mut model.wifi_request) {
        WifiRequestState::Idle => Command::done(),
        WifiRequestState::Connecting { ssid, .. } => {
            log::warn!("connect to {ssid} timed out");
            model.set_error_and_render(CONNECTION_INTERRUPTED)
        }
        WifiRequestState::Disconnecting { .. } => {
            model.stop_loading();
            mark_disconnected(model);
            render()
        }
    }
}

fn mark_disconnected(model: &mut Model) {
    set_active_and_resort(WifiStatus::default(), model);
    model.set_info(RECONNECT_ACCESS_POINT);
}

fn set_active_and_resort(status: WifiStatus, model: &mut Model) {
    model.set_active_wifi(status.active);
    let networks = std::mem::take(&mut model.scanned_networks);
    let sorted = sort_networks(networks, model.active_wifi());
    model.set_scanned_networks(sorted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActiveWifi, UiSection};

    fn home() -> ActiveWifi {
        ActiveWifi {
            ssid: Some("home".to_string()),
            signal: 64,
            channel: Some(6),
            secured: true,
            ip: Some("192.168.178.20".to_string()),
        }
    }

    fn network(ssid: &str, signal: u8) -> WifiNetwork {
        WifiNetwork {
            ssid: ssid.to_string(),
            channel: 1,
            signal,
            secured: true,
        }
    }

    fn connected(active: ActiveWifi) -> WifiStatus {
        WifiStatus {
            connected: true,
            active,
            menu_upside_down: None,
        }
    }

    fn transport_error(message: &str) -> ApiError {
        crate::http_helpers::map_http_error("Test", message)
    }

    fn connect_response(request_id: u32, result: Result<WifiStatus, ApiError>) -> WifiEvent {
        WifiEvent::ConnectResponse { request_id, result }
    }

    fn connect(ssid: &str) -> WifiEvent {
        WifiEvent::Connect {
            ssid: ssid.to_string(),
            password: "password1".to_string(),
        }
    }

    mod status {
        use super::*;

        #[test]
        fn refresh_sets_loading() {
            let mut model = Model::default();

            let _ = handle(WifiEvent::RefreshStatus, &mut model);

            assert!(model.is_loading);
        }

        #[test]
        fn success_updates_active_wifi_and_orientation() {
            let mut model = Model {
                is_loading: true,
                ..Default::default()
            };

            let _ = handle(
                WifiEvent::StatusResponse(Ok(WifiStatus {
                    menu_upside_down: Some(true),
                    ..connected(home())
                })),
                &mut model,
            );

            assert_eq!(model.active_wifi, home());
            assert!(model.menu_upside_down);
            assert!(!model.is_loading);
        }

        #[test]
        fn failure_keeps_active_wifi_and_asks_to_retry() {
            let mut model = Model {
                active_wifi: home(),
                ..Default::default()
            };

            let _ = handle(
                WifiEvent::StatusResponse(Err(transport_error("IO error: Failed to fetch"))),
                &mut model,
            );

            assert_eq!(model.active_wifi, home());
            assert_eq!(model.error_message.as_deref(), Some(TRY_AGAIN));
        }
    }

    mod scan {
        use super::*;

        #[test]
        fn result_is_sorted_with_active_network_first() {
            let mut model = Model {
                active_wifi: home(),
                ..Default::default()
            };

            let _ = handle(
                WifiEvent::ScanResponse(Ok(vec![
                    network("neighbour", 90),
                    network("home", 20),
                    network("cafe", 40),
                ])),
                &mut model,
            );

            let ssids: Vec<_> = model.scanned_networks.iter().map(|n| n.ssid.as_str()).collect();
            assert_eq!(ssids, ["home", "neighbour", "cafe"]);
        }

        #[test]
        fn failure_keeps_previous_list() {
            let previous = vec![network("home", 20)];
            let mut model = Model {
                scanned_networks: previous.clone(),
                ..Default::default()
            };

            let _ = handle(
                WifiEvent::ScanResponse(Err(ApiError::Parse {
                    action: "Scan".to_string(),
                    message: "expected value".to_string(),
                })),
                &mut model,
            );

            assert_eq!(model.scanned_networks, previous);
            assert_eq!(model.error_message.as_deref(), Some(TRY_AGAIN));
        }
    }

    mod connect {
        use super::*;

        fn connecting_model() -> Model {
            Model {
                wifi_request: WifiRequestState::Connecting {
                    request_id: 1,
                    ssid: "X".to_string(),
                    timeout_ms: 20_000,
                },
                last_wifi_request_id: 1,
                is_loading: true,
                ..Default::default()
            }
        }

        #[test]
        fn selecting_secured_network_waits_for_password() {
            let mut model = Model::default();

            let _ = handle(
                WifiEvent::SelectNetwork {
                    ssid: "home".to_string(),
                    secured: true,
                },
                &mut model,
            );

            assert_eq!(model.wifi_session.as_ref().unwrap().target_ssid, "home");
            assert!(model.wifi_request.is_idle());
            assert!(!model.is_loading);
        }

        #[test]
        fn selecting_open_network_connects_immediately() {
            let mut model = Model::default();

            let _ = handle(
                WifiEvent::SelectNetwork {
                    ssid: "cafe".to_string(),
                    secured: false,
                },
                &mut model,
            );

            assert!(matches!(
                model.wifi_request,
                WifiRequestState::Connecting { request_id: 1, ref ssid, timeout_ms: 20_000 } if ssid == "cafe"
            ));
            assert!(model.is_loading);
        }

        #[test]
        fn empty_ssid_is_rejected_locally() {
            let mut model = Model::default();

            let _ = handle(
                WifiEvent::Connect {
                    ssid: String::new(),
                    password: "password1".to_string(),
                },
                &mut model,
            );

            assert!(model.wifi_request.is_idle());
            assert!(model.error_message.is_some());
        }

        #[test]
        fn success_sets_active_wifi_and_clears_session() {
            let mut model = connecting_model();
            model.begin_wifi_session("home", true);
            model.scanned_networks = vec![network("other", 90), network("home", 10)];

            let _ = handle(connect_response(1, Ok(connected(home()))), &mut model);

            assert_eq!(model.active_wifi, home());
            assert!(model.wifi_session.is_none());
            assert!(model.wifi_request.is_idle());
            assert_eq!(model.scanned_networks[0].ssid, "home");
            assert!(!model.is_loading);
        }

        #[test]
        fn rejected_credentials_leave_active_wifi_unchanged() {
            let mut model = connecting_model();
            model.active_wifi = home();
            model.begin_wifi_session("X", true);

            let _ = handle(
                connect_response(1, Ok(WifiStatus::default())),
                &mut model,
            );

            assert_eq!(model.active_wifi, home());
            assert_eq!(model.error_message.as_deref(), Some(CREDENTIALS_REJECTED));
            assert!(model.wifi_session.is_some());
        }

        #[test]
        fn timeout_has_its_own_message() {
            let mut model = connecting_model();

            let _ = handle(
                connect_response(1, Err(transport_error("Request timed out"))),
                &mut model,
            );

            assert_eq!(model.error_message.as_deref(), Some(CONNECTION_INTERRUPTED));
            assert_eq!(model.active_wifi, ActiveWifi::disconnected());
        }

        #[test]
        fn other_errors_report_connection_error() {
            let mut model = connecting_model();

            let _ = handle(
                connect_response(
                    1,
                    Err(ApiError::Rejected {
                        action: "Connect".to_string(),
                        message: "HTTP 400".to_string(),
                    }),
                ),
                &mut model,
            );

            assert_eq!(model.error_message.as_deref(), Some(CONNECTION_ERROR));
        }

        #[test]
        fn shell_timeout_ends_pending_connect() {
            let mut model = connecting_model();

            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);

            assert!(model.wifi_request.is_idle());
            assert!(!model.is_loading);
            assert_eq!(model.error_message.as_deref(), Some(CONNECTION_INTERRUPTED));
        }

        #[test]
        fn late_response_after_timeout_is_ignored() {
            let mut model = connecting_model();

            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);
            let _ = handle(connect_response(1, Ok(connected(home()))), &mut model);

            assert_eq!(model.active_wifi, ActiveWifi::disconnected());
        }

        #[test]
        fn timer_of_rejected_attempt_does_not_end_retry() {
            let mut model = Model::default();

            let _ = handle(connect("home"), &mut model);
            let _ = handle(connect_response(1, Ok(WifiStatus::default())), &mut model);
            let _ = handle(connect("home"), &mut model);
            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);

            assert!(model.wifi_request.is_connecting(2));
            assert!(model.is_loading);

            let _ = handle(connect_response(2, Ok(connected(home()))), &mut model);

            assert_eq!(model.active_wifi, home());
            assert!(model.error_message.is_none());
            assert!(model.wifi_request.is_idle());
        }

        #[test]
        fn response_of_timed_out_attempt_does_not_finish_retry() {
            let mut model = connecting_model();

            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);
            let _ = handle(connect("home"), &mut model);
            let _ = handle(connect_response(1, Ok(WifiStatus::default())), &mut model);

            assert!(model.wifi_request.is_connecting(2));
            assert!(model.is_loading);
        }

        #[test]
        fn connect_is_refused_while_request_pending() {
            let mut model = Model {
                wifi_request: WifiRequestState::Disconnecting {
                    request_id: 4,
                    timeout_ms: 2_000,
                },
                last_wifi_request_id: 4,
                ..Default::default()
            };

            let _ = handle(connect("home"), &mut model);

            assert!(model.wifi_request.is_disconnecting(4));
            assert_eq!(model.last_wifi_request_id, 4);
        }

        #[test]
        fn cancel_clears_session_and_error() {
            let mut model = Model {
                error_message: Some(CREDENTIALS_REJECTED.to_string()),
                ..Default::default()
            };
            model.begin_wifi_session("home", true);

            let _ = handle(WifiEvent::CancelConnect, &mut model);

            assert!(model.wifi_session.is_none());
            assert!(model.error_message.is_none());
        }

        #[test]
        fn password_updates_session() {
            let mut model = Model::default();
            model.begin_wifi_session("home", true);

            let _ = handle(
                WifiEvent::UpdatePassword {
                    password: "correct horse".to_string(),
                },
                &mut model,
            );

            let session = model.wifi_session.as_ref().unwrap();
            assert_eq!(session.password, "correct horse");
            assert!(session.can_submit);
        }
    }

    mod disconnect {
        use super::*;

        fn disconnecting_model() -> Model {
            Model {
                active_wifi: home(),
                wifi_request: WifiRequestState::Disconnecting {
                    request_id: 1,
                    timeout_ms: 2_000,
                },
                last_wifi_request_id: 1,
                active_section: UiSection::WifiSettings,
                ..Default::default()
            }
        }

        #[test]
        fn request_uses_disconnect_budget() {
            let mut model = Model::default();

            let _ = handle(WifiEvent::Disconnect, &mut model);

            assert_eq!(
                model.wifi_request,
                WifiRequestState::Disconnecting {
                    request_id: 1,
                    timeout_ms: 2_000
                }
            );
        }

        #[test]
        fn confirmed_disconnect_uses_device_data() {
            let mut model = disconnecting_model();

            let _ = handle(
                WifiEvent::DisconnectResponse {
                    request_id: 1,
                    result: Ok(WifiStatus::default()),
                },
                &mut model,
            );

            assert!(!model.active_wifi.is_connected());
            assert!(model.info_message.is_none());
        }

        #[test]
        fn failed_disconnect_counts_as_disconnected() {
            let mut model = disconnecting_model();

            let _ = handle(
                WifiEvent::DisconnectResponse {
                    request_id: 1,
                    result: Err(transport_error("IO error: Failed to fetch")),
                },
                &mut model,
            );

            assert!(!model.active_wifi.is_connected());
            assert_eq!(model.info_message.as_deref(), Some(RECONNECT_ACCESS_POINT));
            assert!(model.error_message.is_none());
        }

        #[test]
        fn timed_out_disconnect_counts_as_disconnected() {
            let mut model = disconnecting_model();

            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);

            assert!(!model.active_wifi.is_connected());
            assert!(model.wifi_request.is_idle());
            assert_eq!(model.info_message.as_deref(), Some(RECONNECT_ACCESS_POINT));
        }

        #[test]
        fn timeout_without_pending_request_is_noop() {
            let mut model = Model {
                active_wifi: home(),
                ..Default::default()
            };

            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);

            assert_eq!(model.active_wifi, home());
            assert!(model.info_message.is_none());
        }

        #[test]
        fn disconnect_timer_does_not_end_following_connect() {
            let mut model = disconnecting_model();

            let _ = handle(
                WifiEvent::DisconnectResponse {
                    request_id: 1,
                    result: Ok(WifiStatus::default()),
                },
                &mut model,
            );
            let _ = handle(connect("home"), &mut model);
            let _ = handle(WifiEvent::RequestTimedOut { request_id: 1 }, &mut model);

            assert!(model.wifi_request.is_connecting(2));
            assert!(model.info_message.is_none());
        }

        #[test]
        fn second_disconnect_is_refused_while_pending() {
            let mut model = disconnecting_model();

            let _ = handle(WifiEvent::Disconnect, &mut model);

            assert!(model.wifi_request.is_disconnecting(1));
            assert_eq!(model.last_wifi_request_id, 1);
        }
    }
}
