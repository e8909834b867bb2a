//! Infrastructure Layer
//!
//! PostgreSQL repository and the filesystem avatar store.

pub mod avatar;
pub mod postgres;

pub use avatar::FsAvatarStore;
pub use postgres::PgVaultRepository;
