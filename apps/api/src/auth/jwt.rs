//! Verification of access tokens issued by the hosted identity provider.
//!
//! Tokens are HS256-signed with the project's JWT secret and carry the user id in `sub`.
//! This service never issues tokens; sign-up and sign-in happen upstream.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience claim carried by tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// The subset of access-token claims this service relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: Uuid,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub role: Option<String>,
}

/// Validates signature, expiry and audience, returning the embedded [`Claims`].
pub fn validate_access_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Signs a token the way the identity provider would. Tests only.
#[cfg(test)]
pub fn issue_test_token(user_id: Uuid, secret: &str, expires_in_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id,
        aud: AUTHENTICATED_AUDIENCE.to_string(),
        exp: chrono::Utc::now().timestamp() + expires_in_secs,
        email: Some("writer@example.com".to_string()),
        role: Some("authenticated".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
