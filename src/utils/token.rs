use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::UserRole;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

const TOKEN_TTL_SECS: u64 = 60 * 60 * 12;

pub fn issue_jwt(user_id: Uuid, role: UserRole) -> Result<String> {
    let config = crate::config::get_config();
    let exp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|e| Error::Internal(format!("Clock error: {}", e)))?
        .as_secs()
        + TOKEN_TTL_SECS;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp as usize,
        role: Some(role.as_str().to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
}
