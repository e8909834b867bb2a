//! Entity Module

pub mod account;
pub mod auth_session;
pub mod credentials;
pub mod one_time_token;
