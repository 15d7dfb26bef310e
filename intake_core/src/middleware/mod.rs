//! Middleware components for the HTTP server

pub mod admin;
pub mod cors;
pub mod logging;
