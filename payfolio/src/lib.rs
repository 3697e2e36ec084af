//! Payfolio - typed, session-aware client for the Payfolio personal-finance API.
//!
//! Layers, outermost first:
//! - [`api`]: one method per backend endpoint on [`ApiClient`]
//! - [`client`]: the generic call path (headers, credential, decoding)
//! - [`session`]: where the token pair lives between runs
//! - [`transport`]: the wire, plus an opt-in retry decorator
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use payfolio::session::FileSessionStore;
//! use payfolio::{ApiClient, ClientConfig};
//!
//! # async fn demo() -> Result<(), payfolio::ApiError> {
//! let store = Arc::new(FileSessionStore::open_default()?);
//! let api = ApiClient::new(&ClientConfig::default(), store)?;
//! api.login("a@b.com", "secret").await?;
//! let accounts = api.accounts().await?;
//! println!("{} accounts", accounts.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use client::{ApiClient, ApiRequest};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ApiError, SessionError};
