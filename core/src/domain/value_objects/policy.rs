//! Request-scoped policy inputs: how the id, the code and the expiry of a
//! verification are chosen. Never persisted.

use serde::{Deserialize, Serialize};

/// Caller overrides and expiry for a single initiate/resend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Use this id instead of a generated UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_verification_id: Option<String>,

    /// Use this code instead of a generated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_code: Option<String>,

    /// Lifetime of the record, e.g. `00:05:00` or `PT5M`
    #[serde(default)]
    pub expired_on: String,
}

impl Policy {
    pub fn new(expired_on: impl Into<String>) -> Self {
        Self {
            expired_on: expired_on.into(),
            ..Default::default()
        }
    }

    pub fn with_forced_code(mut self, code: impl Into<String>) -> Self {
        self.forced_code = Some(code.into());
        self
    }

    pub fn with_forced_verification_id(mut self, id: impl Into<String>) -> Self {
        self.forced_verification_id = Some(id.into());
        self
    }
}

/// Alphabet and length for a generated code
///
/// `symbol_set` entries are either category tokens (`alphas`, `ALPHAS`,
/// `DIGITS`, `SYMBOLS`) or literal characters appended as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationSpec {
    pub symbol_set: Vec<String>,
    pub length: usize,
}

impl CodeGenerationSpec {
    pub fn new<I, S>(symbol_set: I, length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbol_set: symbol_set.into_iter().map(Into::into).collect(),
            length,
        }
    }

    /// Six decimal digits, the shape authenticator apps display
    pub fn six_digits() -> Self {
        Self::new(["DIGITS"], 6)
    }
}
