use std::collections::HashSet;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Token codec errors.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    SigningFailed(String),

    #[error("token rejected: {0}")]
    Rejected(String),
}

/// Keyed-MAC codec for client-held or disk-held records.
///
/// Encodes an arbitrary serializable record into a compact HS256-signed token
/// and verifies the signature on the way back in. A record that was tampered
/// with, truncated, or signed under a different key fails to open.
///
/// Expiry is the caller's concern: the codec authenticates bytes, it does not
/// interpret timestamp fields inside the record.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from a signing secret.
    ///
    /// The secret should be at least 32 bytes and come from configuration,
    /// never from source.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Records carry their own lifecycle fields; signature only here.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Serialize and sign a record.
    ///
    /// # Errors
    /// * `SigningFailed` - the record could not be serialized or signed
    pub fn sign<T: Serialize>(&self, record: &T) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), record, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and deserialize the record it carries.
    ///
    /// # Errors
    /// * `Rejected` - malformed token, signature mismatch, or a payload that
    ///   does not deserialize into `T`
    pub fn open<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Rejected(e.to_string()))
    }
}
