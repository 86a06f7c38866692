//! Server-rendered HTML pages. All dynamic text goes through [`escape`].

pub mod admin;
pub mod auth;
pub mod home;
pub mod layout;
pub mod user;

pub(crate) use parking_core::html::escape;
