pub mod config;
pub mod control;
pub mod network;
#[cfg(feature = "esp-hal-runtime")]
mod runtime;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "esp-hal-runtime")]
pub use runtime::run;
