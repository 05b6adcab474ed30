//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the portal service:
//! - Password hashing (Argon2id)
//! - Keyed-MAC token signing and verification (HS256) for serialized records
//!
//! The service defines its own record and session types and adapts these
//! implementations; nothing here knows about users, roles, or sessions.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Signed Records
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.sign(&serde_json::json!({"user": "alice"})).unwrap();
//! let record: serde_json::Value = codec.open(&token).unwrap();
//! assert_eq!(record["user"], "alice");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenCodec;
pub use token::TokenError;
