//! Core library for the `workgen` workload driver.
//!
//! The driver replays a scripted trading workload against a transaction
//! server. This crate holds the pieces the binary is built from: the command
//! schema and line parser, HTTP and TCP transports, configuration, and the
//! dispatch engine with its per-user workers and completion barrier.
pub mod args;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod script;
pub mod transport;
