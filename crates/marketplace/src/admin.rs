//! Admin operations: moderation, farmer verification, and order
//! overrides.

use common::UserId;
use domain::{OrderId, OrderStatus, Role};
use market_store::MarketStore;

use crate::error::{MarketError, Result};
use crate::gate;
use crate::views::{self, AdminDashboard, OrderDetail, OrderSummary};

/// Platform administration.
#[derive(Clone)]
pub struct AdminService {
    store: MarketStore,
}

impl AdminService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Every order on the platform, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn list_all_orders(&self, admin: UserId) -> Result<Vec<OrderSummary>> {
        self.store
            .with_read(|state| {
                gate::require_admin(state, admin)?;
                Ok(state
                    .orders_by_recency()
                    .into_iter()
                    .map(OrderSummary::of)
                    .collect())
            })
            .await
    }

    /// Any order in full detail, without an ownership restriction.
    #[tracing::instrument(skip(self))]
    pub async fn order_detail(&self, admin: UserId, order_id: OrderId) -> Result<OrderDetail> {
        self.store
            .with_read(|state| {
                gate::require_admin(state, admin)?;
                views::order_detail(state, state.order(order_id)?)
            })
            .await
    }

    /// Overrides an order's status directly, bypassing the line-item
    /// state machine. Setting an order back to Pending is not
    /// supported and is silently ignored; line items are never
    /// touched and no rollup runs afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        admin: UserId,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_admin(state, admin)?;
                if state.order_mut(order_id)?.force_status(status) {
                    tracing::info!(order = %order_id, status = ?status, "order status overridden");
                }
                Ok(())
            })
            .await
    }

    /// Flips a user's blocked flag. Admin accounts cannot be blocked.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_block(&self, admin: UserId, target: UserId) -> Result<bool> {
        self.store
            .with_write(|state| {
                gate::require_admin(state, admin)?;
                let profile = state.profile_mut(target)?;
                if profile.role == Role::Admin {
                    return Err(MarketError::NotFound);
                }
                profile.is_blocked = !profile.is_blocked;
                let blocked = profile.is_blocked;
                tracing::info!(user = %target, blocked, "block flag toggled");
                Ok(blocked)
            })
            .await
    }

    /// Marks a farmer account as verified, unlocking the farmer
    /// dashboard. Non-farmer targets are reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn verify_farmer(&self, admin: UserId, target: UserId) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_admin(state, admin)?;
                let profile = state.profile_mut(target)?;
                if profile.role != Role::Farmer {
                    return Err(MarketError::NotFound);
                }
                profile.is_verified = true;
                tracing::info!(user = %target, "farmer verified");
                Ok(())
            })
            .await
    }

    /// Reassigns a user's role. Moving a user into the Farmer role
    /// resets verification; any other role is verified immediately.
    #[tracing::instrument(skip(self))]
    pub async fn set_role(&self, admin: UserId, target: UserId, role: Role) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_admin(state, admin)?;
                let profile = state.profile_mut(target)?;
                profile.role = role;
                profile.is_verified = role != Role::Farmer;
                tracing::info!(user = %target, role = ?role, "role reassigned");
                Ok(())
            })
            .await
    }

    /// Sets the verification flag directly.
    #[tracing::instrument(skip(self))]
    pub async fn set_verified(&self, admin: UserId, target: UserId, verified: bool) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_admin(state, admin)?;
                state.profile_mut(target)?.is_verified = verified;
                Ok(())
            })
            .await
    }

    /// Platform statistics.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self, admin: UserId) -> Result<AdminDashboard> {
        self.store
            .with_read(|state| {
                gate::require_admin(state, admin)?;
                let user_count = state.profiles().count();
                let farmer_count = state
                    .profiles()
                    .filter(|p| p.role == Role::Farmer)
                    .count();
                let order_count = state.orders().count();
                let revenue = state
                    .orders()
                    .filter(|o| o.status() == OrderStatus::Delivered)
                    .map(|o| o.total_amount())
                    .sum();
                Ok(AdminDashboard {
                    user_count,
                    farmer_count,
                    order_count,
                    revenue,
                })
            })
            .await
    }
}
