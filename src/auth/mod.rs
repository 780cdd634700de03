use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Claims carried by a signed bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, expiry_hours: i64) -> Self {
        let now = Utc::now();

        Self {
            email: email.into(),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn token_round_trips_claims() {
        let claims = Claims::new("admin@company.com", 24);
        let token = generate_token(&claims, "test-secret").unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.email, "admin@company.com");
        assert_eq!(decoded.claims.exp, claims.exp);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            email: "admin@company.com".to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(26)).timestamp(),
        };
        let token = generate_token(&claims, "test-secret").unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new("admin@company.com", 24);
        let token = generate_token(&claims, "test-secret").unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
