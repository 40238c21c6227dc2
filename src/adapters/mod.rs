//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `config_file`  | ConfigPort         | JSON file + `FANCTL_*` env   |
//! | `log_sink`     | EventSink          | `log` facade                 |
//!
//! The sensor and fan adapters live in [`crate::sensors`] and
//! [`crate::drivers`], next to the hardware they wrap.

pub mod config_file;
pub mod log_sink;
