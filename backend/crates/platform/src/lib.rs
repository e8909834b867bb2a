//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, random tokens)
//! - Password hashing (Argon2id)
//! - Cookie and client fingerprint handling
//! - Rate limiting
//! - Same-origin redirect validation

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod redirect;
