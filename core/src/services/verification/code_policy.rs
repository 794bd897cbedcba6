//! Verification id and one-time code resolution

use rand::{rngs::OsRng, Rng};
use uuid::Uuid;

use crate::domain::value_objects::{CodeGenerationSpec, Policy};
use crate::errors::ValidationError;

use super::config::MAX_CODE_LENGTH;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*-+=|<>()[]{};:_";

/// Forced verification id when given, otherwise a fresh UUIDv4
pub fn resolve_verification_id(policy: &Policy) -> String {
    match policy.forced_verification_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Forced code when given, otherwise a code generated from `spec`
pub fn resolve_code(
    spec: Option<&CodeGenerationSpec>,
    policy: &Policy,
) -> Result<String, ValidationError> {
    if let Some(code) = policy.forced_code.as_deref().filter(|c| !c.is_empty()) {
        return Ok(code.to_string());
    }

    match spec {
        Some(spec) => generate_code(spec),
        None => Err(ValidationError::MissingCodeSource),
    }
}

/// Draw `spec.length` symbols uniformly from the requested alphabet using the OS CSPRNG
pub fn generate_code(spec: &CodeGenerationSpec) -> Result<String, ValidationError> {
    if spec.length == 0 || spec.length > MAX_CODE_LENGTH {
        return Err(ValidationError::OutOfRange {
            field: "generateCode.length".to_string(),
            min: "1".to_string(),
            max: MAX_CODE_LENGTH.to_string(),
        });
    }

    let alphabet = build_alphabet(&spec.symbol_set);
    if alphabet.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "generateCode.symbolSet".to_string(),
        });
    }

    let mut rng = OsRng;
    Ok((0..spec.length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect())
}

/// Expand category tokens; anything unrecognised is taken literally
fn build_alphabet(symbol_set: &[String]) -> Vec<char> {
    symbol_set
        .iter()
        .flat_map(|token| {
            let symbols = match token.as_str() {
                "alphas" => LOWERCASE,
                "ALPHAS" => UPPERCASE,
                "DIGITS" => DIGITS,
                "SYMBOLS" => SYMBOLS,
                literal => literal,
            };
            symbols.chars().collect::<Vec<_>>()
        })
        .collect()
}
