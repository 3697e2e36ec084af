//! Small acknowledgement bodies returned by action endpoints.

use serde::{Deserialize, Serialize};

/// `{"status": "..."}`, returned by insight read/dismiss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAck {
    pub status: String,
}

/// `{"message": "..."}`, returned by logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAck {
    pub message: String,
}
