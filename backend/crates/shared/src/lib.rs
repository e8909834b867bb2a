//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed ids for accounts, prompts, comments and notifications
//! - Per-field form errors shared by every form action
//! - The request [`viewer::Viewer`] and sign-in guards (feature `axum`)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod form;
pub mod id;
#[cfg(feature = "axum")]
pub mod viewer;
