// storefront_core/src/service/accounts.rs

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::credentials::{CredentialService, TokenPair};
use crate::error::{StorefrontError, StorefrontResult};
use crate::gate::AuthorizationGate;
use crate::model::{NewUser, User, UserDraft};
use crate::store::Store;

const BAD_LOGIN: &str = "Incorrect email or password";

/// Answer to a refresh-token exchange.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
  pub access_token: String,
  pub token_type: &'static str,
}

#[derive(Clone)]
pub struct AccountService {
  store: Arc<dyn Store>,
  credentials: Arc<CredentialService>,
  gate: AuthorizationGate,
}

impl AccountService {
  pub fn new(store: Arc<dyn Store>, credentials: Arc<CredentialService>, gate: AuthorizationGate) -> Self {
    Self {
      store,
      credentials,
      gate,
    }
  }

  #[instrument(name = "accounts::register", skip(self, draft), fields(email = %draft.email, role = %draft.role))]
  pub async fn register(&self, draft: UserDraft) -> StorefrontResult<User> {
    draft.validate()?;
    if self.store.find_user_by_email(&draft.email).await?.is_some() {
      warn!("Attempt to register an existing email.");
      return Err(StorefrontError::Conflict("Email already registered".to_string()));
    }

    let hashed_password = self.credentials.hash_password(&draft.password)?;
    let user = self
      .store
      .insert_user(NewUser {
        email: draft.email,
        hashed_password,
        role: draft.role,
      })
      .await?;
    info!(user_id = user.id, "User registered.");
    Ok(user)
  }

  /// Password login. Unknown email, inactive account and wrong password all
  /// fail identically.
  #[instrument(name = "accounts::login", skip(self, password))]
  pub async fn login(&self, email: &str, password: &str) -> StorefrontResult<TokenPair> {
    let user = match self.store.find_user_by_email(email).await? {
      Some(user) if user.is_active => user,
      _ => {
        warn!("Login for unknown or inactive account.");
        return Err(StorefrontError::Unauthenticated(BAD_LOGIN.to_string()));
      }
    };
    if !self.credentials.verify_password(password, &user.hashed_password)? {
      warn!(user_id = user.id, "Login with wrong password.");
      return Err(StorefrontError::Unauthenticated(BAD_LOGIN.to_string()));
    }

    let pair = self.credentials.issue_token_pair(&user)?;
    info!(user_id = user.id, "User logged in.");
    Ok(pair)
  }

  /// Trades a still-valid refresh token of an active user for a new access token.
  #[instrument(name = "accounts::refresh", skip_all)]
  pub async fn refresh(&self, refresh_token: &str) -> StorefrontResult<AccessToken> {
    let user = self.gate.authenticate(Some(refresh_token)).await?;
    Ok(AccessToken {
      access_token: self.credentials.issue_access_token(&user)?,
      token_type: "bearer",
    })
  }
}
