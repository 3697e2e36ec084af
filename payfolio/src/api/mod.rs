//! Typed endpoint surface.
//!
//! Each submodule adds an `impl ApiClient` block for one backend router.
//! The wrappers fix the path and method and forward the body; only the auth
//! and `/users/me` write operations touch the session store.

mod accounts;
mod assets;
mod auth;
mod billing;
mod insights;
mod liabilities;
mod transactions;
mod users;
