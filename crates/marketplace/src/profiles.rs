//! Profile service: registration and contact details.

use common::UserId;
use domain::{Profile, Role, validate_address, validate_phone};
use market_store::MarketStore;

use crate::error::{MarketError, Result};

/// Manages user profiles.
///
/// Authentication itself is an external concern; callers hand this
/// service an already-established [`UserId`].
#[derive(Clone)]
pub struct ProfileService {
    store: MarketStore,
}

impl ProfileService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Returns the user's profile, creating a default customer
    /// profile on first access.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create(&self, user: UserId) -> Profile {
        self.store
            .with_write(|state| state.profile_or_default(user).clone())
            .await
    }

    /// Registers a profile under a chosen role. Farmers start
    /// unverified; everyone else is verified immediately.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, user: UserId, role: Role) -> Profile {
        self.store
            .with_write(|state| {
                let profile = Profile::register(user, role);
                state.insert_profile(profile.clone());
                profile
            })
            .await
    }

    /// Updates contact details. Empty fields are allowed and stored
    /// as-is; non-empty fields must pass the format rules.
    #[tracing::instrument(skip(self, phone, address))]
    pub async fn update_contact(&self, user: UserId, phone: &str, address: &str) -> Result<()> {
        let phone = phone.trim().to_string();
        let address = address.trim().to_string();

        if !phone.is_empty() && !validate_phone(&phone) {
            return Err(MarketError::InvalidPhone);
        }
        if !address.is_empty() {
            validate_address(&address)?;
        }

        self.store
            .with_write(|state| {
                let profile = state.profile_mut(user)?;
                profile.phone = phone;
                profile.address = address;
                Ok(())
            })
            .await
    }
}
