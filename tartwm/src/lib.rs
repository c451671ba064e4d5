//! Support code shared by the TartWM binaries.

pub mod utils;
