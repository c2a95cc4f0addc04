//! HS256 access tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gasaware_domain::{
    entities::User,
    errors::DomainResult,
    ports::{IssuedToken, TokenIssuer, TokenSubject},
    value_objects::{UserId, UserRole},
};

use crate::error::SecurityError;
use crate::tokens::{generate_refresh_token, generate_verification_token};

/// Signing parameters
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_ttl: Duration,
}

/// Registered and private claims of an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies access tokens
pub struct JwtManager {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    pub fn new(settings: JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            settings,
        }
    }

    pub fn settings(&self) -> &JwtSettings {
        &self.settings
    }

    /// Sign an arbitrary claim set
    pub fn encode(&self, claims: &Claims) -> crate::Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }

    pub fn decode(&self, token: &str) -> crate::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Claims for `user` valid from now for the configured lifetime
    pub fn claims_for(&self, user: &User) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.full_name.clone(),
            role: user.role,
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.settings.access_token_ttl).timestamp(),
        }
    }
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("issuer", &self.settings.issuer)
            .field("audience", &self.settings.audience)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtManager {
    fn issue_access_token(&self, user: &User) -> DomainResult<IssuedToken> {
        let claims = self.claims_for(user);
        let token = self.encode(&claims)?;
        let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
        Ok(IssuedToken { token, expires_at })
    }

    fn verify_access_token(&self, token: &str) -> DomainResult<TokenSubject> {
        let claims = self.decode(token).map_err(|e| {
            debug!(error = %e, "Rejected access token");
            e
        })?;
        let user_id = UserId::from_string(&claims.sub).map_err(|_| SecurityError::InvalidClaim {
            message: format!("subject '{}' is not a user id", claims.sub),
        })?;

        Ok(TokenSubject {
            user_id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }

    fn new_refresh_token(&self) -> String {
        generate_refresh_token()
    }

    fn new_verification_token(&self) -> String {
        generate_verification_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gasaware_domain::entities::UserProfile;
    use gasaware_domain::value_objects::SubscriptionType;
    use gasaware_domain::DomainError;

    fn settings() -> JwtSettings {
        JwtSettings {
            secret: "a-test-secret-that-is-long-enough-for-hs256".into(),
            issuer: "gasaware".into(),
            audience: "gasaware-clients".into(),
            access_token_ttl: Duration::minutes(15),
        }
    }

    fn user() -> User {
        let profile = UserProfile::new(
            NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            SubscriptionType::Bireysel,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();
        User::register("jwt@example.com", "hash".into(), "Jwt User", profile).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let manager = JwtManager::new(settings());
        let user = user();
        let issued = manager.issue_access_token(&user).unwrap();
        assert!(issued.expires_at > Utc::now());

        let subject = manager.verify_access_token(&issued.token).unwrap();
        assert_eq!(subject.user_id, user.id);
        assert_eq!(subject.email, "jwt@example.com");
        assert_eq!(subject.role, UserRole::User);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new(settings());
        let mut claims = manager.claims_for(&user());
        claims.exp = Utc::now().timestamp() - 10;
        let token = manager.encode(&claims).unwrap();

        let err = manager.verify_access_token(&token).unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken { .. }));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let manager = JwtManager::new(settings());
        let mut claims = manager.claims_for(&user());
        claims.aud = "someone-else".into();
        let token = manager.encode(&claims).unwrap();
        assert!(manager.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtManager::new(settings());
        let mut other = settings();
        other.secret = "another-secret-that-is-also-long-enough!!".into();
        let verifier = JwtManager::new(other);

        let token = issuer.issue_access_token(&user()).unwrap().token;
        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let manager = JwtManager::new(settings());
        assert!(manager.verify_access_token("not.a.jwt").is_err());
    }
}
