use anyhow::Result;
use crux_core::typegen::TypeGen;
use sensor_portal_core::{
    events::{SensorEvent, SettingsEvent, UiEvent, WifiEvent},
    types::{AdcBound, SignalLevel, UiSection, WifiRequestState},
    App,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Domain event enums, so every variant is traced
    gen.register_type::<WifiEvent>()?;
    gen.register_type::<SensorEvent>()?;
    gen.register_type::<SettingsEvent>()?;
    gen.register_type::<UiEvent>()?;

    gen.register_type::<UiSection>()?;
    gen.register_type::<AdcBound>()?;
    gen.register_type::<SignalLevel>()?;
    gen.register_type::<WifiRequestState>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
