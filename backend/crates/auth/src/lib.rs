//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations, mail outbox
//! - `presentation/` - HTTP handlers, DTOs, router, viewer middleware
//!
//! ## Features
//! - Sign-up with email, username and password; email confirmation links
//! - Email + password sign-in, magic-link sign-in via one-time codes
//! - Server-side sessions with signed cookie tokens
//! - `resolve_viewer` middleware exposing the signed-in account to other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Sessions bound to client fingerprint (User-Agent)
//! - Automatic lockout after failed login attempts
//! - One-time tokens stored as SHA-256 hashes and consumed atomically

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{LogMailer, PgAuthRepository};
pub use presentation::middleware::with_viewer;
pub use presentation::router::{auth_router, auth_router_generic};
