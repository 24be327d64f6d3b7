//! Product catalog client.
//!
//! A state container over the catalog REST backend: typed HTTP clients, a
//! persisted session, pure reducers with async effects, a router with an
//! auth guard, form validation and plain-text views. The `catalog` binary
//! is a command-line front end over the same pieces.

pub mod api;
pub mod cli;
pub mod config;
pub mod forms;
pub mod logging;
pub mod router;
pub mod session;
pub mod store;
pub mod views;
