//! Entity identity system using kind-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Entity kinds known to the traceability core
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Serialized top-level assembly
    Unit,
    /// Build kit belonging to a unit
    Kit,
    /// Bench or station used during execution
    Fixture,
    /// Lot of purchased components
    ComponentLot,
    /// Group of executions performed together
    Episode,
    /// Template for one ordered process step
    ProcessStep,
    /// Critical-to-quality characteristic of a step
    Ctq,
    /// One concrete performance of a step
    Execution,
    /// Value recorded against a CTQ during an execution
    Measurement,
}

impl EntityKind {
    /// Get the id prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Unit => "UNIT",
            EntityKind::Kit => "KIT",
            EntityKind::Fixture => "FIX",
            EntityKind::ComponentLot => "LOT",
            EntityKind::Episode => "EPI",
            EntityKind::ProcessStep => "STEP",
            EntityKind::Ctq => "CTQ",
            EntityKind::Execution => "EXEC",
            EntityKind::Measurement => "MEAS",
        }
    }

    /// Human-readable name used in messages and tables
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Unit => "unit",
            EntityKind::Kit => "kit",
            EntityKind::Fixture => "fixture",
            EntityKind::ComponentLot => "component lot",
            EntityKind::Episode => "episode",
            EntityKind::ProcessStep => "process step",
            EntityKind::Ctq => "CTQ definition",
            EntityKind::Execution => "process step execution",
            EntityKind::Measurement => "measurement",
        }
    }

    /// Field name a dependent record uses to link to this kind
    pub fn field_name(&self) -> &'static str {
        match self {
            EntityKind::Unit => "unit",
            EntityKind::Kit => "kit",
            EntityKind::Fixture => "fixture",
            EntityKind::ComponentLot => "component_lot",
            EntityKind::Episode => "episode",
            EntityKind::ProcessStep => "step",
            EntityKind::Ctq => "ctq",
            EntityKind::Execution => "execution",
            EntityKind::Measurement => "measurement",
        }
    }

    /// All kinds, parents before children
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Unit,
            EntityKind::Kit,
            EntityKind::Fixture,
            EntityKind::ComponentLot,
            EntityKind::Episode,
            EntityKind::ProcessStep,
            EntityKind::Ctq,
            EntityKind::Execution,
            EntityKind::Measurement,
        ]
    }

    /// Order in which a full reset must clear kinds (children before parents)
    pub fn deletion_order() -> &'static [EntityKind] {
        &[
            EntityKind::Measurement,
            EntityKind::Execution,
            EntityKind::Ctq,
            EntityKind::ProcessStep,
            EntityKind::ComponentLot,
            EntityKind::Fixture,
            EntityKind::Episode,
            EntityKind::Kit,
            EntityKind::Unit,
        ]
    }

    /// Look up a kind by its id prefix
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let upper = prefix.to_uppercase();
        Self::all().iter().copied().find(|k| k.prefix() == upper)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "unit" | "units" => Ok(EntityKind::Unit),
            "kit" | "kits" => Ok(EntityKind::Kit),
            "fixture" | "fixtures" => Ok(EntityKind::Fixture),
            "lot" | "lots" | "component_lot" | "component_lots" => Ok(EntityKind::ComponentLot),
            "episode" | "episodes" => Ok(EntityKind::Episode),
            "step" | "steps" | "process_step" | "process_steps" => Ok(EntityKind::ProcessStep),
            "ctq" | "ctqs" => Ok(EntityKind::Ctq),
            "exec" | "execution" | "executions" => Ok(EntityKind::Execution),
            "meas" | "measurement" | "measurements" => Ok(EntityKind::Measurement),
            _ => Self::from_prefix(s).ok_or_else(|| IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique entity identifier combining a kind prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    kind: EntityKind,
    ulid: Ulid,
}

impl EntityId {
    /// Create a new EntityId of the given kind
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            ulid: Ulid::new(),
        }
    }

    /// Create an EntityId from a kind and existing ULID
    pub fn from_parts(kind: EntityKind, ulid: Ulid) -> Self {
        Self { kind, ulid }
    }

    /// Get the entity kind encoded in the prefix
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let kind = EntityKind::from_prefix(prefix_str)
            .ok_or_else(|| IdParseError::InvalidPrefix(prefix_str.to_string()))?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { kind, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid entity prefix: '{0}' (valid: UNIT, KIT, FIX, LOT, EPI, STEP, CTQ, EXEC, MEAS)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in entity ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
