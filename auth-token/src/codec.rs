use crate::claims::TokenClaims;
use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::identity::{AuthIdentity, Role};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Newly issued token plus its expiry, returned to the login caller
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Encoder/decoder for the signed identity token
///
/// Pure function of input, current time and the signing secret. HMAC
/// verification runs in constant time (ring, via `jsonwebtoken`), so the
/// comparison leaks nothing about the secret.
pub struct TokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for the given subject with the configured TTL
    pub fn issue(
        &self,
        subject_id: Uuid,
        email: &str,
        roles: &HashSet<Role>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(
            subject_id,
            email,
            roles,
            &self.config.issuer,
            self.config.ttl_hours,
        );
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Malformed)?;

        debug!(subject = %subject_id, exp = claims.exp, "issued token");

        Ok(IssuedToken {
            token,
            expires_at: DateTime::from_timestamp(claims.exp, 0)
                .unwrap_or_else(|| Utc::now() + Duration::hours(self.config.ttl_hours)),
        })
    }

    /// Verify a token and return the identity it proves
    ///
    /// Expiry is checked against the unverified claims first so that an
    /// expired token always reports `Expired`, regardless of signature
    /// validity. Nothing from the claims is released to the caller until
    /// the signature check below has passed.
    pub fn decode(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let unverified = self.peek_claims(token)?;
        if unverified.is_expired() {
            return Err(TokenError::Expired);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry was handled above; issuer must match our own.
        validation.validate_exp = false;
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        data.claims.identity()
    }

    /// Parse claims without trusting them: structure and expiry only
    fn peek_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut peek = Validation::new(Algorithm::HS256);
        peek.insecure_disable_signature_validation();
        peek.leeway = 0;
        peek.validate_exp = false;

        let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &peek)
            .map_err(|_| TokenError::Malformed)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(TokenConfig::new(secret))
    }

    fn user_roles() -> HashSet<Role> {
        [Role::User].into_iter().collect()
    }

    #[test]
    fn issue_then_decode_returns_same_identity() {
        let codec = codec("s1");
        let subject_id = Uuid::new_v4();
        let roles: HashSet<Role> = [Role::User, Role::Admin].into_iter().collect();

        let issued = codec.issue(subject_id, "a@x.com", &roles).unwrap();
        let identity = codec.decode(&issued.token).unwrap();

        assert_eq!(identity.subject_id, subject_id);
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.roles, roles);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let signer = codec("s1");
        let verifier = codec("s2");

        let issued = signer
            .issue(Uuid::new_v4(), "a@x.com", &user_roles())
            .unwrap();
        assert_eq!(
            verifier.decode(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::new(TokenConfig::new("s1").with_ttl_hours(-1));
        let issued = codec
            .issue(Uuid::new_v4(), "a@x.com", &user_roles())
            .unwrap();
        assert_eq!(codec.decode(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn expiry_is_reported_even_when_signature_is_wrong() {
        let signer = TokenCodec::new(TokenConfig::new("s1").with_ttl_hours(-1));
        let verifier = codec("s2");

        let issued = signer
            .issue(Uuid::new_v4(), "a@x.com", &user_roles())
            .unwrap();
        assert_eq!(verifier.decode(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec("s1");
        assert_eq!(codec.decode("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.decode(""), Err(TokenError::Malformed));
        assert_eq!(codec.decode("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn tampered_payload_fails_signature_verification() {
        let codec = codec("s1");
        let issued = codec
            .issue(Uuid::new_v4(), "a@x.com", &user_roles())
            .unwrap();

        // Re-sign the same claims under a different key, then splice the
        // original header onto it: structure stays valid, HMAC does not.
        let claims = codec.peek_claims(&issued.token).unwrap();
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"attacker"),
        )
        .unwrap();

        assert_eq!(codec.decode(&forged), Err(TokenError::InvalidSignature));
    }
}
