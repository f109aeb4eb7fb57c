//! LOT entity type - Component lot consumed by a kit
//!
//! Lots are the unit of material traceability: a measurement may name the
//! lot whose parts it was taken on, so a suspect lot can be traced forward
//! to every execution that used it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::identity::{EntityId, EntityKind};

/// Lot of purchased or fabricated components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLot {
    /// Unique identifier (LOT-xxx)
    pub id: EntityId,

    /// Supplier or internal lot identifier, unique across lots
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of pieces in the lot
    pub quantity: u32,

    /// Kit the lot is allocated to (KIT-xxx)
    pub kit: EntityId,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for ComponentLot {
    const KIND: EntityKind = EntityKind::ComponentLot;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{} (qty {})", self.identifier, self.quantity)
    }

    fn natural_key(&self) -> Option<(&'static str, String)> {
        Some(("identifier", self.identifier.clone()))
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("kit", EntityKind::Kit, &self.kit)]
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::ComponentLot(lot) => Some(lot),
            _ => None,
        }
    }
}

/// Fields for creating a [`ComponentLot`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewComponentLot {
    pub identifier: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub kit: EntityId,
}

impl NewComponentLot {
    pub fn new(identifier: impl Into<String>, quantity: u32, kit: &EntityId) -> Self {
        Self {
            identifier: identifier.into(),
            description: None,
            quantity,
            kit: kit.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for NewComponentLot {
    type Entity = ComponentLot;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> ComponentLot {
        ComponentLot {
            id,
            identifier: self.identifier,
            description: self.description,
            quantity: self.quantity,
            kit: self.kit,
            created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_creation() {
        let kit = EntityId::new(EntityKind::Kit);
        let lot = NewComponentLot::new("LOT-AX45", 250, &kit)
            .with_description("Fastener lot for torque validation")
            .build(EntityId::new(EntityKind::ComponentLot), Utc::now());
        assert!(lot.id.to_string().starts_with("LOT-"));
        assert_eq!(lot.quantity, 250);
        assert_eq!(lot.natural_key(), Some(("identifier", "LOT-AX45".to_string())));
    }

    #[test]
    fn test_lot_rejects_negative_quantity() {
        let yaml = r#"
id: LOT-01HC2JB7SMQX7RS1Y0GFKBHPTD
identifier: "LOT-AX45"
quantity: -5
kit: KIT-01HC2JB7SMQX7RS1Y0GFKBHPTE
created: 2024-01-15T10:00:00Z
"#;
        assert!(serde_yml::from_str::<ComponentLot>(yaml).is_err());
    }
}
