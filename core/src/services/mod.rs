//! Business services containing the verification logic.

pub mod verification;

pub use verification::{
    AuthenticatorVerification, EmailProviderTrait, EmailTemplate, EmailVerification,
    InitiateParams, InitiateResult, TotpProviderTrait, ValidateParams, ValidationOutcome,
    VerificationChannel, VerificationEngine, VerificationMethod, VerificationServiceFactory,
    VerificationStoreTrait,
};
