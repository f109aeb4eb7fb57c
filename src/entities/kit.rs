//! KIT entity type - Build kit for a unit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::identity::{EntityId, EntityKind};

/// Kit of parts and tooling assigned to one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    /// Unique identifier (KIT-xxx)
    pub id: EntityId,

    pub name: String,

    /// Kit code, unique across kits
    pub code: String,

    /// Owning unit (UNIT-xxx)
    pub unit: EntityId,

    pub created: DateTime<Utc>,
}

impl Entity for Kit {
    const KIND: EntityKind = EntityKind::Kit;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    fn natural_key(&self) -> Option<(&'static str, String)> {
        Some(("code", self.code.clone()))
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("unit", EntityKind::Unit, &self.unit)]
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Kit(kit) => Some(kit),
            _ => None,
        }
    }
}

/// Fields for creating a [`Kit`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewKit {
    pub name: String,
    pub code: String,
    pub unit: EntityId,
}

impl NewKit {
    pub fn new(name: impl Into<String>, code: impl Into<String>, unit: &EntityId) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            unit: unit.clone(),
        }
    }
}

impl Draft for NewKit {
    type Entity = Kit;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Kit {
        Kit {
            id,
            name: self.name,
            code: self.code,
            unit: self.unit,
            created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_references_unit() {
        let unit = EntityId::new(EntityKind::Unit);
        let kit = NewKit::new("Main Build Kit", "KIT-001", &unit)
            .build(EntityId::new(EntityKind::Kit), Utc::now());
        assert_eq!(
            kit.references(),
            vec![Reference::new("unit", EntityKind::Unit, &unit)]
        );
        assert_eq!(kit.natural_key(), Some(("code", "KIT-001".to_string())));
    }
}
