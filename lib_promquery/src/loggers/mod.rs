/// Installs the `tracing` subscriber with console and rolling file output.
pub mod tracing_setup;

pub use tracing_setup::{build_env_filter, init_tracing, LogInitError, LogOptions};
