//! Audit log storage: store, list, load, and delete resolved targets.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use crate::model::{AuditRecord, Coordinates};

use super::{Result, Storage, StorageError};

/// Raw column values for one audit row, before parsing.
type AuditRow = (String, f64, f64, String);

impl Storage {
    /// Records a resolved target under a fresh identifier.
    pub fn store(&self, coordinates: Coordinates) -> Result<AuditRecord> {
        let record = AuditRecord {
            id: Uuid::new_v4(),
            coordinates,
            recorded_at: Timestamp::now(),
        };
        self.conn.execute(
            "INSERT INTO audit (id, x, y, recorded_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                record.id.to_string(),
                record.coordinates.x,
                record.coordinates.y,
                record.recorded_at.to_string(),
            ],
        )?;
        log::info!(
            "recorded target ({}, {}) as {}",
            coordinates.x,
            coordinates.y,
            record.id
        );
        Ok(record)
    }

    /// Lists every audit record, oldest first.
    ///
    /// Rows that can't be parsed are skipped with a warning.
    pub fn list_audit(&self) -> Result<Vec<AuditRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, x, y, recorded_at FROM audit ORDER BY rowid")?;
        let rows = stmt.query_map([], read_row)?;

        let mut records = Vec::new();
        for row in rows {
            match parse_row(row?) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("skipping audit row: {e}"),
            }
        }
        records.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        Ok(records)
    }

    /// Loads a single audit record, or `None` if no record has this id.
    pub fn load_audit(&self, id: Uuid) -> Result<Option<AuditRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, x, y, recorded_at FROM audit WHERE id = ?1",
                [id.to_string()],
                read_row,
            )
            .optional()?;
        row.map(parse_row).transpose()
    }

    /// Deletes an audit record. Returns whether a record was removed.
    pub fn delete_audit(&self, id: Uuid) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM audit WHERE id = ?1", [id.to_string()])?;
        if rows > 0 {
            log::info!("deleted audit record {id}");
        }
        Ok(rows > 0)
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<AuditRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_row((id, x, y, recorded_at): AuditRow) -> Result<AuditRecord> {
    let id = id
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid audit id {id:?}: {e}")))?;
    let recorded_at = recorded_at
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid recorded_at for {id}: {e}")))?;
    Ok(AuditRecord {
        id,
        coordinates: Coordinates::new(x, y),
        recorded_at,
    })
}
