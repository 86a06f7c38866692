//! Web plumbing shared by parking services: config loading, tracing, request ids,
//! health checks, flash messages and HTML error pages.

pub mod config;
pub mod error;
pub mod flash;
pub mod health;
pub mod html;
pub mod middleware;
pub mod tracing;
