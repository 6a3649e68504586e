//! HTTP API: job service routing, auth, and configuration.

pub mod app;
pub mod config;
pub mod middleware;
