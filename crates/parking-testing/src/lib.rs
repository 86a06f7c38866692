//! Test utilities for the parking service.
//!
//! Provides `MockSession` for cookie-authenticated requests and flash-cookie readers.
//! Import in tests only, never in production code.

pub mod auth;
pub mod flash;
