/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.active_section, section)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.error_message, None;
///     model.info_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for device GET requests that show the loader.
/// The response body is parsed as the given wire type, converted with `From`
/// and handed to the event builder.
///
/// # Example
/// ```ignore
/// device_get!(model, Endpoint::Status, "Wifi status",
///     wire: DeviceWifiStatus,
///     map: |result| Event::Wifi(WifiEvent::StatusResponse(result))
/// )
/// ```
#[macro_export]
macro_rules! device_get {
    ($model:expr, $endpoint:expr, $action:expr, wire: $wire:ty, map: $to_event:expr) => {{
        let to_event = $to_event;
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::get($model.api.url($endpoint))
                .build()
                .then_send(move |result| {
                    to_event($crate::process_json_response::<$wire, _>($action, result))
                }),
        ])
    }};
}

/// Macro for device POST requests with JSON body that show the loader.
///
/// # Example
/// ```ignore
/// device_post!(model, Endpoint::Connect, "Connect",
///     body_json: &request,
///     wire: DeviceWifiStatus,
///     map: move |result| Event::Wifi(WifiEvent::ConnectResponse { request_id, result })
/// )
/// ```
#[macro_export]
macro_rules! device_post {
    ($model:expr, $endpoint:expr, $action:expr, body_json: $body:expr, wire: $wire:ty, map: $to_event:expr) => {{
        let to_event = $to_event;
        $model.start_loading();
        match $crate::HttpCmd::post($model.api.url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => crux_core::Command::all([
                crux_core::render::render(),
                builder.build().then_send(move |result| {
                    to_event($crate::process_json_response::<$wire, _>($action, result))
                }),
            ]),
            Err(e) => {
                $model.set_error_and_render(format!("Failed to create {} request: {}", $action, e))
            }
        }
    }};
}

/// Silent GET - no loading state, the result is handed to a custom event builder.
///
/// Used for background polling where failures should not show errors to user.
///
/// # Example
/// ```ignore
/// silent_get!(model, Endpoint::Sensor, "Sensor readout", wire: DeviceSensorReading,
///     map: move |result| Event::Sensor(SensorEvent::PollResponse { result, value_focused })
/// )
/// ```
#[macro_export]
macro_rules! silent_get {
    ($model:expr, $endpoint:expr, $action:expr, wire: $wire:ty, map: $to_event:expr) => {{
        let to_event = $to_event;
        $crate::HttpCmd::get($model.api.url($endpoint))
            .build()
            .then_send(move |result| {
                to_event($crate::process_json_response::<$wire, _>($action, result))
            })
    }};
}

/// Fire-and-forget POST with JSON body - no loading state, status only.
///
/// The outcome is delivered to the given response event so it can be logged;
/// handlers must not condition state on it.
///
/// # Example
/// ```ignore
/// fire_and_forget!(Sensor, SensorEvent, model, Endpoint::AdcThreshold, SettingApplied, "Adjust ADC",
///     body_json: &request
/// )
/// ```
#[macro_export]
macro_rules! fire_and_forget {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {{
        match $crate::HttpCmd::post($model.api.url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => builder.build().then_send(|result| {
                let event_result = $crate::process_status_response($action, result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                    event_result,
                ))
            }),
            Err(e) => {
                log::warn!("Failed to create {} request: {e}", $action);
                crux_core::Command::done()
            }
        }
    }};
}
