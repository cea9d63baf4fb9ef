//! Output formatting for CLI display.

use uuid::Uuid;

use crate::model::{AuditRecord, Coordinates};

/// The first eight characters of an id, enough to reference it by prefix.
pub(super) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Format an audit record as a single listing line.
pub(super) fn format_record(record: &AuditRecord) -> String {
    let Coordinates { x, y } = record.coordinates;
    format!(
        "{}  ({x}, {y})  {}",
        short_id(record.id),
        record.recorded_at.strftime("%Y-%m-%d %H:%M:%S UTC")
    )
}
