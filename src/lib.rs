//! System report host.
//!
//! Accepts telemetry reports on `POST /system-reports`, stamps them with the
//! receipt time and appends them to an append-only log file.

#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod handler;
pub mod log_sink;
pub mod server;

pub use server::{create_router, AppState};
