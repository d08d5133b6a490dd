// storefront_core/src/gate.rs

//! Authorization gate.
//!
//! A request walks `Unauthenticated -> TokenDecoded -> UserResolved -> RoleChecked`.
//! Every failure before `UserResolved` produces the same `Unauthenticated`
//! error; role and ownership failures produce `Forbidden`.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::credentials::CredentialService;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Product, Role, User};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
  Unauthenticated,
  TokenDecoded,
  UserResolved,
  RoleChecked,
}

impl fmt::Display for GateStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      GateStage::Unauthenticated => "unauthenticated",
      GateStage::TokenDecoded => "token_decoded",
      GateStage::UserResolved => "user_resolved",
      GateStage::RoleChecked => "role_checked",
    };
    f.write_str(name)
  }
}

/// A role an operation demands, plus the message a caller without it sees.
#[derive(Debug, Clone, Copy)]
pub struct RoleRequirement {
  pub role: Role,
  pub denial: &'static str,
}

pub const SELLER_ONLY: RoleRequirement = RoleRequirement {
  role: Role::Seller,
  denial: "Only sellers can perform this action",
};

pub const BUYER_ONLY: RoleRequirement = RoleRequirement {
  role: Role::Buyer,
  denial: "Only buyers can create reviews",
};

pub const ADMIN_ONLY: RoleRequirement = RoleRequirement {
  role: Role::Admin,
  denial: "Only admins can delete reviews",
};

#[derive(Clone)]
pub struct AuthorizationGate {
  credentials: Arc<CredentialService>,
  store: Arc<dyn Store>,
}

impl AuthorizationGate {
  pub fn new(credentials: Arc<CredentialService>, store: Arc<dyn Store>) -> Self {
    Self { credentials, store }
  }

  /// Resolves a bearer token to an active user.
  #[instrument(name = "gate::authenticate", skip_all)]
  pub async fn authenticate(&self, bearer: Option<&str>) -> StorefrontResult<User> {
    let mut stage = GateStage::Unauthenticated;

    let token = match bearer.map(str::trim).filter(|t| !t.is_empty()) {
      Some(token) => token,
      None => {
        debug!(%stage, "No bearer token supplied.");
        return Err(StorefrontError::unauthenticated());
      }
    };

    let claims = self.credentials.decode(token)?;
    stage = GateStage::TokenDecoded;

    let user = match self.store.find_user_by_email(&claims.sub).await? {
      Some(user) if user.is_active => user,
      Some(_) => {
        warn!(%stage, user_id = claims.id, "Token belongs to a deactivated user.");
        return Err(StorefrontError::unauthenticated());
      }
      None => {
        warn!(%stage, user_id = claims.id, "Token subject no longer exists.");
        return Err(StorefrontError::unauthenticated());
      }
    };
    stage = GateStage::UserResolved;
    debug!(%stage, user_id = user.id, role = %user.role, "Bearer token resolved.");
    Ok(user)
  }

  /// `authenticate` followed by [`require_role`].
  pub async fn authorize(&self, bearer: Option<&str>, requirement: RoleRequirement) -> StorefrontResult<User> {
    let user = self.authenticate(bearer).await?;
    require_role(&user, requirement)?;
    Ok(user)
  }
}

pub fn require_role(user: &User, requirement: RoleRequirement) -> StorefrontResult<()> {
  if user.role != requirement.role {
    warn!(
      user_id = user.id,
      role = %user.role,
      required = %requirement.role,
      "Role check failed."
    );
    return Err(StorefrontError::forbidden(requirement.denial));
  }
  debug!(stage = %GateStage::RoleChecked, user_id = user.id, "Role check passed.");
  Ok(())
}

/// Independent of the role check: a seller may only touch their own products.
pub fn require_owner(user: &User, product: &Product, denial: &'static str) -> StorefrontResult<()> {
  if product.seller_id != user.id {
    warn!(
      user_id = user.id,
      product_id = product.id,
      owner_id = product.seller_id,
      "Ownership check failed."
    );
    return Err(StorefrontError::forbidden(denial));
  }
  Ok(())
}
