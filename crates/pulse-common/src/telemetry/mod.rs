//! Telemetry and observability setup

mod tracing_setup;

pub use tracing_setup::{init_tracing, try_init_tracing, TracingConfig, TracingError};
