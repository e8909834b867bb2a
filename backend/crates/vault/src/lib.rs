//! Vault (Prompt Sharing) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, prompt/profile validation, template variables, repository traits
//! - `application/` - Use cases, card rendering, sitemap
//! - `infra/` - PostgreSQL repository, filesystem avatar store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Prompt CRUD with public/private visibility and `{{variable}}` templates
//! - Likes, bookmarks, follows and comments
//! - Latest / trending / following feeds, full-text explore, creator directory
//! - Like and follow notifications with an unread badge endpoint
//! - Profile settings and avatar uploads
//! - `robots.txt`, `sitemap.xml` and SVG social cards
//!
//! Counters (`like_count`, `follower_count`, ...) and notifications are
//! maintained by database triggers; this crate only reads them.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use infra::{FsAvatarStore, PgVaultRepository};
pub use presentation::router::{vault_router, vault_router_generic};
