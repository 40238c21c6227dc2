//! fanctl library.
//!
//! Exposes the control loop, its port traits, and the Linux adapters for
//! integration testing.  The binary in `main.rs` only wires them together.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod sensors;
pub mod shutdown;
