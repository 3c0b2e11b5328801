//! Bearer token issuing and verification.
//!
//! Tokens have the shape `<claims>.<signature>`:
//! - `claims` is the base64url (no padding) encoding of `{"sub": user_id, "exp": unix_secs}`
//! - `signature` is the hex HMAC-SHA256 of the encoded claims
//!
//! The signature is compared in constant time.

use anyhow::{Context, bail};
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::{TimeDelta, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// user id
    pub sub: i64,
    /// expiration as unix seconds
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenSigner {
    key: [u8; 32],
    ttl: TimeDelta,
}

impl TokenSigner {
    pub fn new(key: [u8; 32], ttl: TimeDelta) -> Self {
        Self { key, ttl }
    }

    fn mac(&self) -> anyhow::Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).context("token hmac could not be created")
    }

    /// Issues a token for `user_id` valid for the signer ttl
    pub fn issue(&self, user_id: i64) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        let encoded_claims = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);

        let mut mac = self.mac()?;
        mac.update(encoded_claims.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{encoded_claims}.{signature}"))
    }

    /// Returns the claims of a well signed, non expired token
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let Some((encoded_claims, signature_hex)) = token.split_once('.') else {
            bail!("malformed token")
        };

        let expected_signature = hex::decode(signature_hex).context("malformed token signature")?;

        let mut mac = self.mac()?;
        mac.update(encoded_claims.as_bytes());
        let computed_signature = mac.finalize().into_bytes();

        let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();
        if !is_valid {
            bail!("token signature mismatch")
        }

        let claims = serde_json::from_slice::<Claims>(
            &BASE64_URL_SAFE_NO_PAD
                .decode(encoded_claims)
                .context("malformed token claims")?,
        )?;

        if claims.exp <= Utc::now().timestamp() {
            bail!("token expired")
        }

        Ok(claims)
    }
}
