//! Subscription plans and checkout.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Paid plans a checkout can be started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Pro,
    Business,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    #[default]
    Stripe,
    Razorpay,
}

macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        concat!("unknown ", stringify!($ty), " {:?}, expected one of: ", $($text, " "),+),
                        other
                    )),
                }
            }
        }
    };
}

string_enum!(Plan { Pro => "pro", Business => "business" });
string_enum!(BillingCycle { Monthly => "monthly", Yearly => "yearly" });
string_enum!(PaymentProvider { Stripe => "stripe", Razorpay => "razorpay" });

/// Body of `POST /billing/checkout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub plan: Plan,
    pub billing_cycle: BillingCycle,
    pub provider: PaymentProvider,
}

impl CheckoutRequest {
    /// Stripe checkout for `plan` on `billing_cycle`.
    pub fn new(plan: Plan, billing_cycle: BillingCycle) -> Self {
        Self {
            plan,
            billing_cycle,
            provider: PaymentProvider::default(),
        }
    }
}

/// Response of `POST /billing/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub session_id: String,
}

/// Response of `GET /billing/subscription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// `free`, `pro` or `business`.
    pub plan: String,
    pub status: String,
    pub billing_cycle: String,
    #[serde(default, with = "timestamp::option")]
    pub current_period_end: Option<DateTime<Utc>>,
    pub max_accounts: u32,
}
