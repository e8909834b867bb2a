//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::VaultAppState;
pub use router::{vault_router, vault_router_generic};
