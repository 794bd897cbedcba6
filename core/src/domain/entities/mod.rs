//! Domain entities representing core business objects.

pub mod authenticator_secret;
pub mod tenant;
pub mod verification;

// Re-export commonly used types
pub use authenticator_secret::AuthenticatorSecret;
pub use tenant::TenantContext;
pub use verification::{Verification, VerificationRecord};
