//! Auth types for the parking service.
//!
//! Provides session JWT issue/validation, session cookie builders and password hashing.

pub mod cookie;
pub mod password;
pub mod token;
