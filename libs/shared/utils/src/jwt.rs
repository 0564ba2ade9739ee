use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use tracing::debug;

use shared_models::auth::{Claims, TokenVerification};

type HmacSha256 = Hmac<Sha256>;

/// Tokens issued by the user-upsert path are valid for one hour. There is no
/// refresh mechanism; clients re-upsert to get a fresh token.
const TOKEN_TTL_HOURS: i64 = 1;

pub fn create_token(email: &str, secret: &str) -> Result<String, String> {
    create_token_with_expiry(email, secret, Duration::hours(TOKEN_TTL_HOURS))
}

pub fn create_token_with_expiry(
    email: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, String> {
    if secret.is_empty() {
        return Err("Token secret is not set".to_string());
    }

    let now = Utc::now();

    let header = json!({
        "alg": "HS256",
        "typ": "JWT"
    });

    let claims = json!({
        "email": email,
        "iat": now.timestamp(),
        "exp": (now + ttl).timestamp()
    });

    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Verify a bearer token against the server-held secret. Expiry is only
/// checked once the signature and claims have been accepted, so `Expired` is
/// never reported for a token we did not sign.
pub fn verify_token(token: &str, secret: &str) -> TokenVerification {
    if secret.is_empty() {
        debug!("Token secret is not set");
        return TokenVerification::Malformed;
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return TokenVerification::Malformed;
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return TokenVerification::Malformed;
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return TokenVerification::Malformed,
    };

    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return TokenVerification::Malformed;
    }

    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return TokenVerification::Malformed,
        },
        Err(_) => return TokenVerification::Malformed,
    };

    let claims: Claims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return TokenVerification::Malformed;
        }
    };

    let now = Utc::now().timestamp();
    if claims.exp < now {
        debug!("Token expired at {} (now: {})", claims.exp, now);
        return TokenVerification::Expired;
    }

    debug!("Token validated successfully for {}", claims.email);
    TokenVerification::Valid(claims)
}
