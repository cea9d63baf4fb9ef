//! Protocols: the targeting directives a request carries.
//!
//! Six protocols exist, paired into three mutually exclusive groups.
//! A request may name at most one protocol per group, and no protocol twice.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A targeting directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// Prefer the nearest contact.
    ClosestEnemies,

    /// Prefer the most distant contact.
    FurthestEnemies,

    /// Prefer contacts where allies are engaged.
    AssistAllies,

    /// Never fire on contacts where allies are present.
    AvoidCrossfire,

    /// Prefer mech contacts.
    PrioritizeMech,

    /// Never fire on mech contacts.
    AvoidMech,
}

/// The mutual-exclusion group a protocol belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolGroup {
    /// `closest-enemies` / `furthest-enemies`.
    Distance,

    /// `assist-allies` / `avoid-crossfire`.
    AllyPosture,

    /// `prioritize-mech` / `avoid-mech`.
    MechPosture,
}

impl Protocol {
    /// Every protocol in the catalog.
    pub const ALL: [Self; 6] = [
        Self::ClosestEnemies,
        Self::FurthestEnemies,
        Self::AssistAllies,
        Self::AvoidCrossfire,
        Self::PrioritizeMech,
        Self::AvoidMech,
    ];

    /// The wire token for this protocol.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClosestEnemies => "closest-enemies",
            Self::FurthestEnemies => "furthest-enemies",
            Self::AssistAllies => "assist-allies",
            Self::AvoidCrossfire => "avoid-crossfire",
            Self::PrioritizeMech => "prioritize-mech",
            Self::AvoidMech => "avoid-mech",
        }
    }

    pub fn group(self) -> ProtocolGroup {
        match self {
            Self::ClosestEnemies | Self::FurthestEnemies => ProtocolGroup::Distance,
            Self::AssistAllies | Self::AvoidCrossfire => ProtocolGroup::AllyPosture,
            Self::PrioritizeMech | Self::AvoidMech => ProtocolGroup::MechPosture,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ProtocolError::Unknown(s.to_string()))
    }
}

/// Why a protocol list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unknown protocol: {0}")]
    Unknown(String),

    #[error("duplicate protocol: {0}")]
    Duplicate(Protocol),

    #[error("conflicting protocols: {0} and {1}")]
    Conflicting(Protocol, Protocol),
}

/// A validated, order-insensitive set of protocols.
///
/// Holds no duplicates and at most one protocol per [`ProtocolGroup`].
/// The only way to build one is [`validate_protocols`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolSet {
    protocols: HashSet<Protocol>,
}

impl ProtocolSet {
    pub fn contains(&self, protocol: Protocol) -> bool {
        self.protocols.contains(&protocol)
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

/// Validate a list of protocol tokens into a [`ProtocolSet`].
///
/// Tokens are checked in order. A repeated token is reported as a duplicate
/// before any group conflict is considered.
pub fn validate_protocols<S: AsRef<str>>(tokens: &[S]) -> Result<ProtocolSet, ProtocolError> {
    let protocols = tokens
        .iter()
        .map(|t| t.as_ref().parse::<Protocol>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(protocols.len());
    for &protocol in &protocols {
        if !seen.insert(protocol) {
            return Err(ProtocolError::Duplicate(protocol));
        }
    }

    let mut claimed: Vec<Protocol> = Vec::with_capacity(protocols.len());
    for &protocol in &protocols {
        if let Some(&other) = claimed.iter().find(|c| c.group() == protocol.group()) {
            return Err(ProtocolError::Conflicting(other, protocol));
        }
        claimed.push(protocol);
    }

    Ok(ProtocolSet { protocols: seen })
}
