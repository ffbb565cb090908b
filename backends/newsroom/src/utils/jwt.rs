use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{db::UserId, error::AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub user_id: UserId,
}

/// HS256 keys derived from the configured secret.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub lifetime: Duration,
}

impl SessionKeys {
    pub fn from_secret(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime,
        }
    }
}

pub fn generate_jwt(user_id: UserId, keys: &SessionKeys) -> AppResult<String> {
    let exp = (chrono::Utc::now() + keys.lifetime).timestamp();
    let claims = Claims { exp, user_id };
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)?;

    Ok(token)
}

pub fn verify_token(token: &str, key: &DecodingKey) -> AppResult<UserId> {
    let claim = verify_jwt(token, key)?;
    Ok(claim.user_id)
}

pub fn verify_jwt(token: &str, key: &DecodingKey) -> AppResult<Claims> {
    let claims =
        jsonwebtoken::decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims)
}
