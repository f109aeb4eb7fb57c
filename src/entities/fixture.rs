//! FIX entity type - Assembly bench or station

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::identity::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kit the fixture is staged with (KIT-xxx)
    pub kit: EntityId,
    pub created: DateTime<Utc>,
}

impl Entity for Fixture {
    const KIND: EntityKind = EntityKind::Fixture;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("kit", EntityKind::Kit, &self.kit)]
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Fixture(fixture) => Some(fixture),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFixture {
    pub name: String,
    pub description: Option<String>,
    pub kit: EntityId,
}

impl NewFixture {
    pub fn new(name: impl Into<String>, kit: &EntityId) -> Self {
        Self {
            name: name.into(),
            description: None,
            kit: kit.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for NewFixture {
    type Entity = Fixture;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Fixture {
        Fixture {
            id,
            name: self.name,
            description: self.description,
            kit: self.kit,
            created,
        }
    }
}
