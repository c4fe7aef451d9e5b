use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::Claims;

const SESSION_LIFETIME_HOURS: i64 = 24;

/// Issues and validates signed session tokens (HS256 JWT)
///
/// The signing key is handed in at construction and never changes
/// afterwards, so one instance can be shared freely across requests.
pub struct SessionTokenService {
    signing_key: String,
    session_lifetime: Duration,
}

impl SessionTokenService {
    /// Create a new SessionTokenService with the given signing key
    pub fn new(signing_key: String) -> Self {
        Self {
            signing_key,
            session_lifetime: Duration::hours(SESSION_LIFETIME_HOURS),
        }
    }

    /// Session lifetime in seconds
    pub fn lifetime_seconds(&self) -> i64 {
        self.session_lifetime.num_seconds()
    }

    /// Issue a token asserting `subject`, valid for 24 hours from now
    pub fn issue(&self, subject: &str) -> Result<String, InternalError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, InternalError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.session_lifetime.num_seconds(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.signing_key.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a token and return its subject
    ///
    /// Bad signatures, malformed tokens and expired tokens all produce the
    /// same `InvalidToken` error; the reason is kept for logs only.
    pub fn validate(&self, token: &str) -> Result<String, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.signing_key.as_bytes()),
            &validation,
        )
        .map_err(|e| CredentialError::invalid_token(format!("{:?}", e.kind())))?;

        // Valid only while exp > now; the decoder alone accepts exp == now
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(CredentialError::invalid_token("ExpiredSignature").into());
        }

        Ok(token_data.claims.sub)
    }
}

impl fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("signing_key", &"<redacted>")
            .field("session_lifetime_hours", &self.session_lifetime.num_hours())
            .finish()
    }
}

impl fmt::Display for SessionTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionTokenService {{ session_lifetime: {}h }}",
            self.session_lifetime.num_hours()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    const TEST_KEY: &str = "test-secret-key-minimum-32-characters-long";

    fn create_test_service() -> SessionTokenService {
        SessionTokenService::new(TEST_KEY.to_string())
    }

    #[test]
    fn test_validate_returns_subject_of_fresh_token() {
        let service = create_test_service();

        let token = service.issue("a@x.com").unwrap();
        let subject = service.validate(&token).unwrap();

        assert_eq!(subject, "a@x.com");
    }

    #[test]
    fn test_token_lifetime_is_24_hours() {
        let service = create_test_service();
        let token = service.issue("a@x.com").unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_KEY.as_bytes()),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.exp - decoded.claims.iat, 86_400);
        assert_eq!(service.lifetime_seconds(), 86_400);
    }

    #[test]
    fn test_iat_is_current_time() {
        let service = create_test_service();

        let before = Utc::now().timestamp();
        let token = service.issue("a@x.com").unwrap();
        let after = Utc::now().timestamp();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_KEY.as_bytes()),
            &validation,
        )
        .unwrap();

        assert!(decoded.claims.iat >= before);
        assert!(decoded.claims.iat <= after);
    }

    #[test]
    fn test_validate_fails_after_expiry() {
        let service = create_test_service();

        let issued_at = Utc::now() - Duration::hours(25);
        let token = service.issue_at("a@x.com", issued_at).unwrap();

        let err = service.validate(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert!(matches!(
            err,
            InternalError::Credential(CredentialError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_validate_fails_at_exact_expiry() {
        let service = create_test_service();

        // exp == now
        let issued_at = Utc::now() - Duration::hours(24);
        let token = service.issue_at("a@x.com", issued_at).unwrap();

        let err = service.validate(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    }

    #[test]
    fn test_validate_succeeds_just_before_expiry() {
        let service = create_test_service();

        let issued_at = Utc::now() - Duration::hours(23);
        let token = service.issue_at("a@x.com", issued_at).unwrap();

        assert_eq!(service.validate(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn test_validate_fails_with_wrong_signing_key() {
        let service = create_test_service();
        let other = SessionTokenService::new("wrong-secret-key-minimum-32-characters".to_string());

        let token = service.issue("a@x.com").unwrap();
        let err = other.validate(&token).unwrap_err();

        assert!(matches!(
            err,
            InternalError::Credential(CredentialError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_validate_fails_with_garbage() {
        let service = create_test_service();

        for token in ["garbage-token", "", "a.b.c"] {
            let err = service.validate(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        }
    }

    #[test]
    fn test_validate_fails_with_tampered_payload() {
        let service = create_test_service();
        let token = service.issue("a@x.com").unwrap();
        let forged = service.issue("b@x.com").unwrap();

        // Signature of one token spliced onto the payload of another
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(service.validate(&spliced).is_err());
    }

    #[test]
    fn test_debug_and_display_do_not_expose_signing_key() {
        let service = create_test_service();

        let debug_output = format!("{:?}", service);
        let display_output = format!("{}", service);

        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains(TEST_KEY));
        assert!(!display_output.contains(TEST_KEY));
        assert!(display_output.contains("24h"));
    }
}
