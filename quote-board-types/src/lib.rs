//! Shared types for the quote board service and its RPC clients.

use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Domain Types
// =====================================================

/// A single quote. Quotes carry no identifier; duplicates are allowed and
/// the collection is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}

// =====================================================
// RPC Request Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AddQuoteRequest {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomQuoteRequest {
    /// Category to draw from; `None` or `"all"` means the full collection.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectCategoryRequest {
    pub category: String,
}

// =====================================================
// RPC Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_quotes: i64,
    pub category_count: i64,
    pub selected_category: String,
    pub sync_interval_secs: u64,
    pub last_sync_at: Option<String>,
    pub last_viewed: Option<Quote>,
    pub notification: Option<String>,
}
