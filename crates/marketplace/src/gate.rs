//! Actor gate: the authorization checkpoint at the entry of every
//! operation.
//!
//! Callers always pass an explicit [`UserId`]; there is no ambient
//! current-user state. The gate resolves the caller's profile,
//! checks the required role, and denies blocked accounts. Farmer
//! operations additionally filter by product ownership at the call
//! site, surfacing failures as `NotFound`.

use common::UserId;
use domain::{Profile, Role};
use market_store::StoreState;

use crate::error::{MarketError, Result};

/// Resolves the caller's profile and requires an exact role.
///
/// Role mismatch is a [`MarketError::ForbiddenRole`] (the "wrong
/// dashboard" case); a blocked account is denied afterwards, matching
/// the original check order.
pub fn require_role(state: &StoreState, user: UserId, required: Role) -> Result<&Profile> {
    let profile = state.profile(user)?;
    if profile.role != required {
        return Err(MarketError::ForbiddenRole { required });
    }
    if profile.is_blocked {
        return Err(MarketError::AccountBlocked);
    }
    Ok(profile)
}

/// Gate for shopping operations (cart, checkout, own orders).
///
/// Any signed-in, non-blocked account may shop — farmers buy from
/// other farmers, which is why the self-purchase rule exists at all.
pub fn require_shopper(state: &StoreState, user: UserId) -> Result<&Profile> {
    let profile = state.profile(user)?;
    if profile.is_blocked {
        return Err(MarketError::AccountBlocked);
    }
    Ok(profile)
}

/// Gate for farmer fulfillment and catalog operations.
pub fn require_farmer(state: &StoreState, user: UserId) -> Result<&Profile> {
    require_role(state, user, Role::Farmer)
}

/// Gate for the farmer dashboard, which additionally requires admin
/// verification.
pub fn require_verified_farmer(state: &StoreState, user: UserId) -> Result<&Profile> {
    let profile = require_role(state, user, Role::Farmer)?;
    if !profile.is_verified {
        return Err(MarketError::PendingVerification);
    }
    Ok(profile)
}

/// Gate for admin operations.
pub fn require_admin(state: &StoreState, user: UserId) -> Result<&Profile> {
    require_role(state, user, Role::Admin)
}
