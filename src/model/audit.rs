//! Audit records: every target the radar has committed to.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coordinates;

/// A resolved target, as persisted in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: Uuid,
    pub coordinates: Coordinates,
    pub recorded_at: Timestamp,
}
