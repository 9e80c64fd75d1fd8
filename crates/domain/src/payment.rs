//! Payment methods.

use serde::{Deserialize, Serialize};

/// How an order is paid for.
///
/// Online payment is offered as a selection but never honored:
/// checkout rejects it and asks the customer to choose cash on
/// delivery instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    CashOnDelivery,
    #[serde(rename = "ONLINE")]
    Online,
}

impl PaymentMethod {
    /// Returns the wire label for the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "COD",
            PaymentMethod::Online => "ONLINE",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
