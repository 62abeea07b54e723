use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use shared_models::auth::{CurrentUser, SessionClaims, SessionHeader};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "medismart_session";

fn sign(signing_input: &str, secret: &str) -> Result<Vec<u8>, String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Issues a signed session token for `user`, valid for `ttl_hours`.
pub fn issue_token(user: &CurrentUser, secret: &str, ttl_hours: i64) -> Result<String, String> {
    if secret.is_empty() {
        return Err("Session secret is not set".to_string());
    }

    let now = Utc::now();
    let claims = SessionClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };
    let header = SessionHeader { alg: "HS256".to_string(), typ: "JWT".to_string() };

    let header_json = serde_json::to_string(&header).map_err(|e| e.to_string())?;
    let claims_json = serde_json::to_string(&claims).map_err(|e| e.to_string())?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );
    let signature = sign(&signing_input, secret)?;

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

pub fn validate_token(token: &str, secret: &str) -> Result<CurrentUser, String> {
    if secret.is_empty() {
        return Err("Session secret is not set".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];

    let signature = URL_SAFE_NO_PAD.decode(parts[2]).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        "Invalid signature encoding".to_string()
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Session signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let header: SessionHeader = URL_SAFE_NO_PAD
        .decode(header_b64)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .ok_or_else(|| "Invalid header encoding".to_string())?;
    if header.alg != "HS256" {
        return Err(format!("Unsupported algorithm: {}", header.alg));
    }

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| "Invalid claims encoding".to_string())?;
    let claims: SessionClaims = serde_json::from_slice(&claims_bytes).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        "Invalid claims format".to_string()
    })?;

    let now = Utc::now().timestamp();
    if claims.exp < now {
        debug!("Session expired at {} (now: {})", claims.exp, now);
        return Err("Session expired".to_string());
    }

    let user = CurrentUser {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        role: claims.role,
        session_started_at: Utc.timestamp_opt(claims.iat, 0).single(),
    };

    debug!("Session validated for user: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::auth::Role;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "user-1".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Doctor,
            session_started_at: None,
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token(&user(), "secret", 1).unwrap();
        let validated = validate_token(&token, "secret").unwrap();

        assert_eq!(validated.id, "user-1");
        assert_eq!(validated.name, "Asha Rao");
        assert_eq!(validated.role, Role::Doctor);
        assert!(validated.session_started_at.is_some());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&user(), "secret", 1).unwrap();
        assert_eq!(validate_token(&token, "other").unwrap_err(), "Invalid token signature");
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(&user(), "secret", -1).unwrap();
        assert_eq!(validate_token(&token, "secret").unwrap_err(), "Session expired");
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(validate_token("abc", "secret").unwrap_err(), "Invalid token format");
        assert!(validate_token("a.b.!!!", "secret").is_err());
        assert!(issue_token(&user(), "", 1).is_err());
    }
}
