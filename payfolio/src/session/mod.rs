//! Session storage: where the token pair lives between calls and runs.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
