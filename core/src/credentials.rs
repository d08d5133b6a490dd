// storefront_core/src/credentials.rs

//! Password hashing and signed bearer tokens.

use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    SaltString,
  },
  Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Role, User};

pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token payload: `{sub: email, role, id, exp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub role: Role,
  pub id: i64,
  pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
  pub access_token: String,
  pub refresh_token: String,
  pub token_type: &'static str,
}

/// Stateless: holds only the signing keys and token lifetimes.
pub struct CredentialService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  access_ttl: Duration,
  refresh_ttl: Duration,
}

impl CredentialService {
  pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
    let mut validation = Validation::new(ALGORITHM);
    validation.set_required_spec_claims(&["exp", "sub"]);
    // Expiry is exact; the crate default tolerates 60s of clock skew.
    validation.leeway = 0;
    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validation,
      access_ttl,
      refresh_ttl,
    }
  }

  /// 30-minute access tokens, 7-day refresh tokens.
  pub fn with_default_ttls(secret: &[u8]) -> Self {
    Self::new(
      secret,
      Duration::minutes(DEFAULT_ACCESS_TTL_MINUTES),
      Duration::days(DEFAULT_REFRESH_TTL_DAYS),
    )
  }

  #[instrument(name = "credentials::hash_password", skip_all, err(Display))]
  pub fn hash_password(&self, password: &str) -> StorefrontResult<String> {
    if password.is_empty() {
      return Err(StorefrontError::validation("Password cannot be empty"));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map(|hash| hash.to_string())
      .map_err(|argon_err| {
        error!(error = %argon_err, "Argon2 password hashing failed.");
        StorefrontError::Credential(format!("password hashing failed: {}", argon_err))
      })
  }

  /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
  #[instrument(name = "credentials::verify_password", skip_all, err(Display))]
  pub fn verify_password(&self, password: &str, hashed_password: &str) -> StorefrontResult<bool> {
    let parsed_hash = PasswordHash::new(hashed_password).map_err(|parse_err| {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      StorefrontError::Credential(format!("invalid stored password hash: {}", parse_err))
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => {
        debug!("Password verification failed: passwords do not match.");
        Ok(false)
      }
      Err(other) => {
        error!(error = %other, "Argon2 password verification encountered an error.");
        Err(StorefrontError::Credential(format!("password verification failed: {}", other)))
      }
    }
  }

  pub fn issue_access_token(&self, user: &User) -> StorefrontResult<String> {
    self.issue(user, self.access_ttl)
  }

  pub fn issue_refresh_token(&self, user: &User) -> StorefrontResult<String> {
    self.issue(user, self.refresh_ttl)
  }

  pub fn issue_token_pair(&self, user: &User) -> StorefrontResult<TokenPair> {
    Ok(TokenPair {
      access_token: self.issue_access_token(user)?,
      refresh_token: self.issue_refresh_token(user)?,
      token_type: "bearer",
    })
  }

  fn issue(&self, user: &User, ttl: Duration) -> StorefrontResult<String> {
    let claims = Claims {
      sub: user.email.clone(),
      role: user.role,
      id: user.id,
      exp: (Utc::now() + ttl).timestamp(),
    };
    encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
      .map_err(|e| StorefrontError::Credential(format!("token signing failed: {}", e)))
  }

  /// Any signature, expiry or payload problem collapses into the generic
  /// `Unauthenticated` error; the specific cause is only logged.
  pub fn decode(&self, token: &str) -> StorefrontResult<Claims> {
    decode::<Claims>(token, &self.decoding_key, &self.validation)
      .map(|data| data.claims)
      .map_err(|e| {
        warn!(reason = %e, "Rejected bearer token.");
        StorefrontError::unauthenticated()
      })
  }
}
