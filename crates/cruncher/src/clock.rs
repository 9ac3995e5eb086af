//! Clock Abstraction
//!
//! Provides the timestamp source for audit log entries. Substitutable so
//! tests can pin `call_time` to a known value.

use chrono::{SecondsFormat, Utc};

/// Timestamp provider for audit log entries
pub trait Clock: Send + Sync {
    /// Current time as an ISO-8601 string
    fn now_iso(&self) -> String;
}

/// Wall-clock implementation backed by chrono
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Clock that always returns the same timestamp, for deterministic tests
pub struct FixedClock {
    timestamp: String,
}

impl FixedClock {
    pub fn new(timestamp: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
        }
    }
}

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.timestamp.clone()
    }
}
