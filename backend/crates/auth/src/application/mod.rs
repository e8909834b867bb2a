//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod magic_link;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_token;

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionInfoOutput};
pub use config::AuthConfig;
pub use magic_link::{MAGIC_LINK_SENT_MESSAGE, MagicLinkInput, MagicLinkUseCase};
pub use session::{issue_session_token, parse_session_token};
pub use sign_in::{ClientFingerprint, SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{CONFIRMATION_SENT_MESSAGE, SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_token::VerifyTokenUseCase;
