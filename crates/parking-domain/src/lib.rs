//! Domain types shared across the parking workspace.
//!
//! This crate contains only pure types and rules with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod billing;
pub mod lot;
pub mod spot;
pub mod user;
