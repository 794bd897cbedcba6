//! # Verifier Core
//!
//! Domain layer of the verification service: entities, the error taxonomy,
//! code policy, the base verification engine, the email and authenticator
//! channels, and the collaborator traits the infrastructure crate implements.

pub mod domain;
pub mod errors;
pub mod services;

pub use domain::{
    AuthenticatorSecret, CodeGenerationSpec, Policy, TenantContext, Verification,
    VerificationRecord,
};
pub use errors::{DomainError, DomainResult, ValidationError};
pub use services::{
    EmailProviderTrait, InitiateParams, InitiateResult, TotpProviderTrait, ValidateParams,
    ValidationOutcome, VerificationChannel, VerificationMethod, VerificationServiceFactory,
    VerificationStoreTrait,
};
