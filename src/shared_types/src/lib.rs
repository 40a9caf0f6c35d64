//! TypeScript bindings for the sensor portal core are generated by `build.rs`
//! into `generated/typescript`.
