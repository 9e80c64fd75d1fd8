//! User profile with role, block, and verification flags.

use chrono::{DateTime, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};

/// Role a profile acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    Farmer,
    #[default]
    Customer,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Farmer => "Farmer",
            Role::Customer => "Customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user profile consumed by the actor gate.
///
/// `is_verified` is meaningful only for farmers, where it gates
/// dashboard access. `is_blocked` denies customer and farmer
/// operations but does not retroactively alter existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user: UserId,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub is_blocked: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a default profile: customer, unblocked, unverified.
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            role: Role::Customer,
            phone: String::new(),
            address: String::new(),
            is_blocked: false,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    /// Creates a profile registered under a specific role.
    ///
    /// Farmers start unverified and must be approved by an admin
    /// before their dashboard opens; other roles are verified
    /// immediately.
    pub fn register(user: UserId, role: Role) -> Self {
        Self {
            role,
            is_verified: role != Role::Farmer,
            ..Self::new(user)
        }
    }
}

/// Checks a contact phone number: exactly ten ASCII digits.
pub fn validate_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}
