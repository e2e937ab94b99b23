//! battbrrr-host
//!
//! Preview server standing in for the controller's embedded web server:
//! serves the UI bundle plus the `/info.json` and `/config.js` endpoints the
//! page expects.

pub mod api;
pub mod config;
pub mod embedded;
