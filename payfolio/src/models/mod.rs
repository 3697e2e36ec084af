//! Request and response records for the Payfolio API.
//!
//! Field names follow the backend's snake_case JSON. Money is
//! [`rust_decimal::Decimal`], which decodes from either a JSON string or a
//! number and encodes as a string.

mod ack;
mod account;
mod asset;
mod auth;
mod billing;
mod insight;
mod liability;
mod portfolio;
mod session;
pub(crate) mod timestamp;
mod transaction;

pub use ack::{MessageAck, StatusAck};
pub use account::{Account, AccountList, AccountUpdate, NewAccount, SyncResult};
pub use asset::{Asset, AssetUpdate, NewAsset};
pub use auth::{
    AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, TokenPair, UserProfile,
};
pub use billing::{BillingCycle, CheckoutRequest, CheckoutSession, PaymentProvider, Plan, Subscription};
pub use insight::{GenerateOutcome, Insight, InsightList};
pub use liability::{Liability, LiabilityList, LiabilityUpdate, NewLiability};
pub use portfolio::{Portfolio, PortfolioBreakdown};
pub use session::Session;
pub use transaction::{
    Category, NewTransaction, Transaction, TransactionFilter, TransactionKind, TransactionList,
    TransactionStats, TransactionUpdate,
};

pub(crate) use transaction::query_timestamp;
