//! Logging utilities.
//!
//! Hosts call [`init_logging`] once at startup. The engine itself only talks
//! to the `log` facade:
//! - `debug` for session start and termination
//! - `trace` for per-tick progress and redundant releases
//! - `error` for panicking callbacks and failed ticks

mod init;

pub use init::{LoggingConfig, init_logging};
