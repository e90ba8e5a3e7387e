//! Blog admin console gateway.
//!
//! Serves the console, gates its pages on the session cookie, and proxies
//! every API call to the backend that owns users and blogs. [`client`] is
//! the typed side of the same API.

pub mod backend;
pub mod client;
pub mod config;
pub mod forms;
pub mod models;
pub mod routes;
pub mod state;
