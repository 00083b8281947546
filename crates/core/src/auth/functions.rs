use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{AdminCredentials, SessionClaims, SessionError};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of generated signing secrets.
pub const SECRET_LEN: usize = 32;

/// Generate a random signing secret.
pub fn generate_secret() -> Vec<u8> {
    let mut secret = vec![0u8; SECRET_LEN];
    rand::rng().fill_bytes(&mut secret);
    secret
}

fn sign(secret: &[u8], payload: &str) -> Result<HmacSha256, SessionError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| SessionError::Key(e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

/// Encode claims as `<base64 json>.<hex hmac>`.
pub fn encode_session(claims: &SessionClaims, secret: &[u8]) -> Result<String, SessionError> {
    let json = serde_json::to_vec(claims).map_err(|e| SessionError::Decode(e.to_string()))?;
    let payload = STANDARD.encode(json);
    let signature = hex::encode(sign(secret, &payload)?.finalize().into_bytes());
    Ok(format!("{payload}.{signature}"))
}

/// Decode a token and verify its signature. Does not check expiry.
pub fn decode_session(token: &str, secret: &[u8]) -> Result<SessionClaims, SessionError> {
    let (payload, signature) = token.rsplit_once('.').ok_or(SessionError::Malformed)?;
    let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;

    sign(secret, payload)?
        .verify_slice(&signature)
        .map_err(|_| SessionError::BadSignature)?;

    let json = STANDARD
        .decode(payload)
        .map_err(|e| SessionError::Decode(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| SessionError::Decode(e.to_string()))
}

/// Check decoded claims against the configured admin and TTL.
pub fn check_claims(
    claims: &SessionClaims,
    admin_user: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<(), SessionError> {
    if !claims.valid {
        return Err(SessionError::Invalidated);
    }
    if claims.user != admin_user {
        return Err(SessionError::WrongUser);
    }
    // An expiry past chrono's range never arrives.
    if claims
        .created_at
        .checked_add_signed(ttl)
        .is_some_and(|expires_at| expires_at <= now)
    {
        return Err(SessionError::Expired);
    }
    Ok(())
}

/// Decode, verify and check a session token in one step.
pub fn validate_session(
    token: &str,
    secret: &[u8],
    admin_user: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<SessionClaims, SessionError> {
    let claims = decode_session(token, secret)?;
    check_claims(&claims, admin_user, ttl, now)?;
    Ok(claims)
}

/// Compare submitted credentials against the admin pair.
pub fn verify_credentials(expected: &AdminCredentials, username: &str, password: &str) -> bool {
    // Evaluate both so timing does not reveal which field was wrong.
    let user_ok = constant_time_eq(expected.username.as_bytes(), username.as_bytes());
    let pass_ok = constant_time_eq(expected.password.as_bytes(), password.as_bytes());
    user_ok & pass_ok
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
