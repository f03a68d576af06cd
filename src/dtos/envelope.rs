//! Response envelope shared by every successful endpoint

use crate::core::format;
use serde::Serialize;
use serde_json::Value;

/// Message served in place of the endpoint's own when the database failed
pub const DEGRADED_MESSAGE: &str = "Database unavailable, returning empty data";

/// `{ success, message, data, stats?, filters?, degraded?, timestamp }`
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            stats: None,
            filters: None,
            degraded: false,
            timestamp: format::sql_datetime(format::now()),
        }
    }

    pub fn with_stats(mut self, stats: impl Serialize) -> Self {
        self.stats = serde_json::to_value(stats).ok();
        self
    }

    pub fn with_filters(mut self, filters: Value) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Marks the response degraded when `degraded` is set, replacing the message.
    pub fn degraded(mut self, degraded: bool) -> Self {
        if degraded {
            self.degraded = true;
            self.message = DEGRADED_MESSAGE.to_string();
        }
        self
    }
}
