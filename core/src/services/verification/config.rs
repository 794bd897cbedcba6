//! Fixed names and defaults shared by the verification channels

/// Channel name (and key prefix) of the email specialization
pub const EMAIL_METHOD: &str = "email";

/// Channel name (and key prefix) of the authenticator specialization
pub const AUTHENTICATOR_METHOD: &str = "google_auth";

/// Subject used when the template does not carry one
pub const DEFAULT_EMAIL_SUBJECT: &str = "Verification Email";

/// Replaced with the one-time code in email bodies
pub const CODE_PLACEHOLDER: &str = "{{{CODE}}}";

/// Replaced with the verification id in email bodies
pub const VERIFICATION_ID_PLACEHOLDER: &str = "{{{VERIFICATION_ID}}}";

/// Upper bound for `generateCode.length`
pub const MAX_CODE_LENGTH: usize = 31;
