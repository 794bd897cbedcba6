//! Domain layer containing verification entities and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::{AuthenticatorSecret, TenantContext, Verification, VerificationRecord};
pub use value_objects::{parse_ttl, CodeGenerationSpec, Policy};
