//! CLI interface for the radar.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//!
//! - `radar resolve [FILE]`: resolve a targeting request and record the target.
//! - `radar audit list|show|delete`: inspect and prune the audit log.
//! - `radar ping`: check that the audit database is reachable.
//!
//! Audit ids take a full UUID or an unambiguous prefix.

mod format;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use uuid::Uuid;

use crate::model::{AuditRecord, RadarRequest};
use crate::storage::Storage;
use crate::targeting::{self, Targeting};

use format::{format_record, short_id};

/// Radar: pick one target from a scan.
#[derive(Debug, Parser)]
#[command(name = "radar", after_long_help = REQUEST_HELP)]
pub struct Cli {
    /// Path to the audit database.
    /// Overrides `RADAR_DATABASE` and `~/.radar/config.toml`.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

const REQUEST_HELP: &str = r#"Request format:
  {
    "protocols": ["avoid-mech", "closest-enemies"],
    "scan": [
      { "coordinates": { "x": 35, "y": 5 }, "enemies": { "type": "soldier", "number": 10 } },
      { "coordinates": { "x": 5, "y": 5 }, "enemies": { "type": "mech", "number": 1 }, "allies": 3 }
    ]
  }

Protocols (at most one from each pair):
  closest-enemies | furthest-enemies
  assist-allies   | avoid-crossfire
  prioritize-mech | avoid-mech"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a targeting request and record the chosen target.
    ///
    /// Reads the request JSON from FILE, or stdin when FILE is omitted or `-`.
    /// The recorded target is printed as JSON on stdout.
    /// When nothing can be targeted, `No target` is printed to stderr.
    Resolve {
        /// Request file.
        file: Option<PathBuf>,

        /// Resolve without recording the target.
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect and prune the audit log of recorded targets.
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },

    /// Check that the audit database can be opened.
    Ping,
}

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List every recorded target, oldest first.
    List {
        /// Print the records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a single recorded target as JSON.
    Show {
        /// Audit id: full UUID or unambiguous prefix.
        id: String,
    },

    /// Delete a recorded target.
    Delete {
        /// Audit id: full UUID or unambiguous prefix.
        id: String,
    },
}

/// Run a parsed command, returning an error message on failure.
pub fn run(command: &Command, storage: &Storage) -> Result<(), String> {
    match command {
        Command::Resolve { file, dry_run } => cmd_resolve(storage, file.as_ref(), *dry_run),
        Command::Audit { command } => match command {
            AuditCommand::List { json } => cmd_list(storage, *json),
            AuditCommand::Show { id } => cmd_show(storage, id),
            AuditCommand::Delete { id } => cmd_delete(storage, id),
        },
        Command::Ping => {
            println!("OK!");
            Ok(())
        }
    }
}

fn cmd_resolve(storage: &Storage, file: Option<&PathBuf>, dry_run: bool) -> Result<(), String> {
    let request = read_request(file)?;

    let outcome = targeting::acquire(storage, &request, !dry_run).map_err(|e| e.to_string())?;

    let json = match outcome {
        Targeting::Acquired(record) => serde_json::to_string_pretty(&record),
        Targeting::Resolved(coordinates) => serde_json::to_string_pretty(&coordinates),
        Targeting::NoTarget => {
            eprintln!("No target");
            return Ok(());
        }
    }
    .map_err(|e| format!("failed to serialize target: {e}"))?;

    println!("{json}");
    Ok(())
}

fn cmd_list(storage: &Storage, json: bool) -> Result<(), String> {
    let records = storage
        .list_audit()
        .map_err(|e| format!("failed to list audit records: {e}"))?;

    if json {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| format!("failed to serialize audit records: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if records.is_empty() {
        println!("No audit records");
        return Ok(());
    }

    for record in &records {
        println!("{}", format_record(record));
    }

    Ok(())
}

fn cmd_show(storage: &Storage, reference: &str) -> Result<(), String> {
    let record = resolve_record(storage, reference)?;
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| format!("failed to serialize audit record: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_delete(storage: &Storage, reference: &str) -> Result<(), String> {
    let record = resolve_record(storage, reference)?;
    let deleted = storage
        .delete_audit(record.id)
        .map_err(|e| format!("failed to delete audit record: {e}"))?;
    if !deleted {
        return Err(format!("audit record {} not found", short_id(record.id)));
    }
    eprintln!("Deleted {}", short_id(record.id));
    Ok(())
}

/// Read and parse a request from a file, or stdin when no file (or `-`) is given.
fn read_request(file: Option<&PathBuf>) -> Result<RadarRequest, String> {
    let (reader, source): (Box<dyn Read>, String) = match file {
        Some(path) if path.as_os_str() != "-" => {
            let f =
                File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            (Box::new(BufReader::new(f)), path.display().to_string())
        }
        _ => (Box::new(io::stdin().lock()), "stdin".to_string()),
    };

    serde_json::from_reader(reader).map_err(|e| format!("invalid request from {source}: {e}"))
}

/// Resolve an audit reference (full UUID or unambiguous prefix) to a record.
fn resolve_record(storage: &Storage, reference: &str) -> Result<AuditRecord, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_audit(id)
            .map_err(|e| format!("failed to load audit record: {e}"))?
            .ok_or_else(|| format!("no audit record {id}"));
    }

    let records = storage
        .list_audit()
        .map_err(|e| format!("failed to list audit records: {e}"))?;
    match_prefix(records, reference)
}

fn match_prefix(records: Vec<AuditRecord>, reference: &str) -> Result<AuditRecord, String> {
    if reference.is_empty() {
        return Err("audit id cannot be empty".to_string());
    }

    let mut matches: Vec<AuditRecord> = records
        .into_iter()
        .filter(|r| r.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no audit record matching '{reference}'")),
        1 => Ok(matches.remove(0)),
        n => {
            let ids: Vec<String> = matches.iter().map(|r| short_id(r.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} records: {}",
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::Coordinates;

    fn record(id: &str) -> AuditRecord {
        AuditRecord {
            id: id.parse().unwrap(),
            coordinates: Coordinates::new(1.0, 2.0),
            recorded_at: Timestamp::now(),
        }
    }

    fn records() -> Vec<AuditRecord> {
        vec![
            record("a3b0fc12-0000-4000-8000-000000000001"),
            record("a3b1dd00-0000-4000-8000-000000000002"),
            record("ffee0000-0000-4000-8000-000000000003"),
        ]
    }

    #[test]
    fn parses_resolve_command() {
        let cli = Cli::try_parse_from([
            "radar",
            "--database",
            "x.sqlite",
            "resolve",
            "req.json",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("x.sqlite")));
        assert!(matches!(
            cli.command,
            Command::Resolve {
                file: Some(_),
                dry_run: true
            }
        ));
    }

    #[test]
    fn parses_audit_commands() {
        let cli = Cli::try_parse_from(["radar", "audit", "delete", "a3b"]).unwrap();
        let Command::Audit {
            command: AuditCommand::Delete { id },
        } = cli.command
        else {
            panic!("expected audit delete");
        };
        assert_eq!(id, "a3b");
    }

    #[test]
    fn unique_prefix_matches() {
        let found = match_prefix(records(), "a3b0").unwrap();
        assert_eq!(found.id.to_string(), "a3b0fc12-0000-4000-8000-000000000001");
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let err = match_prefix(records(), "a3b").unwrap_err();
        assert!(err.contains("ambiguous"), "{err}");
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        let err = match_prefix(records(), "0123").unwrap_err();
        assert!(err.contains("no audit record"), "{err}");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        assert!(match_prefix(records(), "").is_err());
    }

    #[test]
    fn resolves_full_uuid_and_prefix_from_storage() {
        let storage = Storage::in_memory().unwrap();
        let stored = storage.store(Coordinates::new(3.0, 4.0)).unwrap();

        let by_id = resolve_record(&storage, &stored.id.to_string()).unwrap();
        let by_prefix = resolve_record(&storage, &stored.id.to_string()[..8]).unwrap();

        assert_eq!(by_id, stored);
        assert_eq!(by_prefix, stored);
        assert!(resolve_record(&storage, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn resolve_from_file_records_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            r#"{
                "protocols": ["closest-enemies"],
                "scan": [
                    { "coordinates": { "x": 90, "y": 90 }, "enemies": { "type": "soldier", "number": 5 }, "allies": 0 },
                    { "coordinates": { "x": 60, "y": 60 }, "enemies": { "type": "soldier", "number": 7 }, "allies": 0 }
                ]
            }"#,
        )
        .unwrap();
        let storage = Storage::in_memory().unwrap();

        cmd_resolve(&storage, Some(&path), false).unwrap();

        let records = storage.list_audit().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].coordinates, Coordinates::new(60.0, 60.0));
    }

    #[test]
    fn malformed_request_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{ "protocols": ["closest-enemies"] }"#).unwrap();
        let storage = Storage::in_memory().unwrap();

        let err = cmd_resolve(&storage, Some(&path), false).unwrap_err();
        assert!(err.starts_with("invalid request"), "{err}");
    }

    #[test]
    fn delete_removes_by_prefix() {
        let storage = Storage::in_memory().unwrap();
        let stored = storage.store(Coordinates::new(3.0, 4.0)).unwrap();

        cmd_delete(&storage, &short_id(stored.id)).unwrap();

        assert!(storage.list_audit().unwrap().is_empty());
    }
}
