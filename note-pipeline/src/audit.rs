//! Per-call, append-only audit trail.
//!
//! A trail is created for one note and dropped with the result; nothing is
//! persisted. Details carry counts and flags only, never note content, with
//! the single exception of the 50-character preview logged on refusal.

use std::collections::BTreeSet;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    /// RFC3339, UTC, millisecond precision.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub details: Map<String, Value>,
    pub status: AuditStatus,
}

/// Aggregate view over a trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditSummary {
    pub total_events: usize,
    /// Distinct event types, sorted.
    pub event_types: Vec<&'static str>,
    pub success_count: usize,
    pub error_count: usize,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditTrail {
    events: Vec<AuditEvent>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful event.
    pub fn record(&mut self, event_type: &'static str, details: Value) {
        self.push(event_type, details, AuditStatus::Success);
    }

    /// Appends a failed event.
    pub fn record_error(&mut self, event_type: &'static str, details: Value) {
        self.push(event_type, details, AuditStatus::Error);
    }

    /// Appends an event. Non-object `details` are stored under `"value"`.
    pub fn push(&mut self, event_type: &'static str, details: Value, status: AuditStatus) {
        let details = match details {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => Map::from_iter([("value".to_string(), other)]),
        };
        tracing::debug!(event = event_type, ?status, "audit");
        self.events.push(AuditEvent {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event_type,
            details,
            status,
        });
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AuditEvent> {
        self.events
    }

    pub fn summary(&self) -> AuditSummary {
        let event_types: BTreeSet<&'static str> =
            self.events.iter().map(|e| e.event_type).collect();
        let count = |s: AuditStatus| self.events.iter().filter(|e| e.status == s).count();

        AuditSummary {
            total_events: self.events.len(),
            event_types: event_types.into_iter().collect(),
            success_count: count(AuditStatus::Success),
            error_count: count(AuditStatus::Error),
            start_time: self.events.first().map(|e| e.timestamp.clone()),
            end_time: self.events.last().map(|e| e.timestamp.clone()),
        }
    }
}
