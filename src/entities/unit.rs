//! UNIT entity type - Serialized top-level assembly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record};
use crate::core::identity::{EntityId, EntityKind};

/// Serialized unit under build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier (UNIT-xxx)
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Serial number, unique across units
    pub serial_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Unit {
    const KIND: EntityKind = EntityKind::Unit;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.serial_number)
    }

    fn natural_key(&self) -> Option<(&'static str, String)> {
        Some(("serial_number", self.serial_number.clone()))
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

/// Fields for creating a [`Unit`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewUnit {
    pub name: String,
    pub serial_number: String,
    pub description: Option<String>,
}

impl NewUnit {
    pub fn new(name: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial_number: serial_number.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for NewUnit {
    type Entity = Unit;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Unit {
        Unit {
            id,
            name: self.name,
            serial_number: self.serial_number,
            description: self.description,
            created,
        }
    }
}
