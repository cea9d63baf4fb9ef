//! Targeting: carry a request from raw input to a recorded target.
//!
//! Validation runs first and gates everything else. A request with bad
//! protocols never reaches the resolver. When the resolver picks a target,
//! it is written to the audit log.

use log::{debug, info};

use crate::model::{AuditRecord, Coordinates, ProtocolError, RadarRequest, validate_protocols};
use crate::resolve::resolve;
use crate::storage::{Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum TargetingError {
    #[error("invalid protocols: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What came of a targeting request.
#[derive(Debug, Clone, PartialEq)]
pub enum Targeting {
    /// A target was chosen and recorded.
    Acquired(AuditRecord),

    /// A target was chosen but, as asked, not recorded.
    Resolved(Coordinates),

    /// Nothing in the scan could be targeted.
    NoTarget,
}

/// Validate, resolve, and (when `record` is set) persist a request.
pub fn acquire(
    storage: &Storage,
    request: &RadarRequest,
    record: bool,
) -> Result<Targeting, TargetingError> {
    let protocols = validate_protocols(&request.protocols)?;
    debug!(
        "resolving {} contacts under {} protocol(s)",
        request.scan.len(),
        protocols.len()
    );
    if protocols.is_empty() {
        debug!("no protocols given, taking the first contact in range");
    }

    let Some(target) = resolve(&protocols, &request.scan) else {
        info!("no target in scan of {} contacts", request.scan.len());
        return Ok(Targeting::NoTarget);
    };

    if !record {
        return Ok(Targeting::Resolved(target));
    }
    Ok(Targeting::Acquired(storage.store(target)?))
}
