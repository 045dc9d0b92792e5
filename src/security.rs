//! Anti-forgery tokens binding browse requests to the page view that issued
//! them.
//!
//! A token is an HS256 JWT carrying the session id it was issued for and an
//! expiry. A browse request is accepted only when its token verifies and
//! names the session presenting it.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claim identifying what a token may be used for.
const BROWSE_PURPOSE: &str = "browse";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("anti-forgery token missing")]
    Missing,
    #[error("no browse session")]
    NoSession,
    #[error("anti-forgery token invalid: {0}")]
    Invalid(String),
    #[error("anti-forgery token issued for another session")]
    SessionMismatch,
    #[error("failed to issue anti-forgery token: {0}")]
    Issue(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sid: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct AntiForgery {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl AntiForgery {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Issues a token for the given session.
    pub fn issue(&self, session_id: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sid: session_id.to_string(),
            purpose: BROWSE_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Checks that `token` is valid, unexpired and bound to `session_id`.
    pub fn verify(&self, token: &str, session_id: Option<&str>) -> Result<(), TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }
        let session_id = session_id.ok_or(TokenError::NoSession)?;

        let data = decode::<TokenClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if data.claims.purpose != BROWSE_PURPOSE {
            return Err(TokenError::Invalid("wrong purpose".to_string()));
        }
        if data.claims.sid != session_id {
            return Err(TokenError::SessionMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies_for_same_session() {
        let guard = AntiForgery::new(SECRET, 3600);
        let token = guard.issue("session-1").unwrap();
        assert_eq!(guard.verify(&token, Some("session-1")), Ok(()));
    }

    #[test]
    fn token_from_other_session_is_rejected() {
        let guard = AntiForgery::new(SECRET, 3600);
        let token = guard.issue("session-1").unwrap();
        assert_eq!(
            guard.verify(&token, Some("session-2")),
            Err(TokenError::SessionMismatch)
        );
    }

    #[test]
    fn missing_token_or_session_is_rejected() {
        let guard = AntiForgery::new(SECRET, 3600);
        assert_eq!(guard.verify("", Some("s")), Err(TokenError::Missing));
        let token = guard.issue("s").unwrap();
        assert_eq!(guard.verify(&token, None), Err(TokenError::NoSession));
    }

    #[test]
    fn expired_or_foreign_tokens_are_invalid() {
        let expired = AntiForgery::new(SECRET, -3600).issue("s").unwrap();
        let guard = AntiForgery::new(SECRET, 3600);
        assert!(matches!(
            guard.verify(&expired, Some("s")),
            Err(TokenError::Invalid(_))
        ));

        let foreign = AntiForgery::new(b"another secret entirely", 3600)
            .issue("s")
            .unwrap();
        assert!(matches!(
            guard.verify(&foreign, Some("s")),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            guard.verify("not-a-jwt", Some("s")),
            Err(TokenError::Invalid(_))
        ));
    }
}
