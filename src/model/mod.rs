//! Core data model for the radar.
//!
//! These types describe a targeting request end to end:
//! the protocols a caller asks for, the scan they submit,
//! and the audit record left behind when a target is chosen.

mod audit;
mod protocol;
mod scan;

pub use audit::AuditRecord;
pub use protocol::{Protocol, ProtocolError, ProtocolSet, validate_protocols};
pub use scan::{Coordinates, EnemyInfo, EnemyKind, RadarRequest, ScanEntry};
