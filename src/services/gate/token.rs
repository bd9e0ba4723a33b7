//! Session token verification (HS256 JWT).
//!
//! Only the signature and the `nbf`/`exp` window are checked. Possession of a
//! validly signed, unexpired token is what "authenticated" means here; callers
//! that need claim-level checks can decode the payload themselves after a
//! `Valid` verdict.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::services::settings::JwtSecret;

/// Outcome of validating one token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No token was presented.
    Absent,
    /// Malformed, undecodable, wrong algorithm, bad signature, or not yet valid.
    Invalid,
    /// Correctly signed but past `exp`.
    Expired,
    Valid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Absent => "absent",
            Verdict::Invalid => "invalid",
            Verdict::Expired => "expired",
            Verdict::Valid => "valid",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// NumericDate claims may be integers or floats.
#[derive(Debug, Deserialize)]
struct ValidityWindow {
    #[serde(default)]
    exp: Option<f64>,
    #[serde(default)]
    nbf: Option<f64>,
}

/// HS256 token verifier.
///
/// The library's clock checks are disabled; the window is evaluated against the
/// `now` passed by the caller so verification stays a pure function of
/// `(token, secret, now)`.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    validation: Validation,
    leeway_seconds: u64,
}

impl Default for TokenValidator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TokenValidator {
    pub fn new(leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            validation,
            leeway_seconds,
        }
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    /// Verify `token` against `secret` at unix time `now` (seconds).
    pub fn verify(&self, token: &str, secret: &JwtSecret, now: i64) -> Verdict {
        if token.is_empty() {
            return Verdict::Absent;
        }

        let key = DecodingKey::from_secret(secret.as_bytes());
        let window = match jsonwebtoken::decode::<ValidityWindow>(token, &key, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                debug!(error_kind = ?err.kind(), "token rejected");
                return Verdict::Invalid;
            }
        };

        let leeway = i64::try_from(self.leeway_seconds).unwrap_or(i64::MAX);

        if let Some(nbf) = window.nbf {
            if nbf > now.saturating_add(leeway) as f64 {
                debug!(nbf, now, "token not yet valid");
                return Verdict::Invalid;
            }
        }

        let Some(exp) = window.exp else {
            debug!("token has no exp claim");
            return Verdict::Invalid;
        };
        if exp <= now.saturating_sub(leeway) as f64 {
            return Verdict::Expired;
        }

        Verdict::Valid
    }
}

/// Verify with the default validator (no leeway).
pub fn verify(token: &str, secret: &JwtSecret, now: i64) -> Verdict {
    TokenValidator::default().verify(token, secret, now)
}
