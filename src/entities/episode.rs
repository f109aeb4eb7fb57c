//! EPI entity type - A build run grouping executions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::identity::{EntityId, EntityKind};

/// Group of executions performed together (e.g. one pilot run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit: EntityId,
    pub kit: EntityId,
    pub created: DateTime<Utc>,
}

impl Entity for Episode {
    const KIND: EntityKind = EntityKind::Episode;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("unit", EntityKind::Unit, &self.unit),
            Reference::new("kit", EntityKind::Kit, &self.kit),
        ]
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Episode(episode) => Some(episode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEpisode {
    pub title: String,
    pub description: Option<String>,
    pub unit: EntityId,
    pub kit: EntityId,
}

impl NewEpisode {
    pub fn new(title: impl Into<String>, unit: &EntityId, kit: &EntityId) -> Self {
        Self {
            title: title.into(),
            description: None,
            unit: unit.clone(),
            kit: kit.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for NewEpisode {
    type Entity = Episode;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Episode {
        Episode {
            id,
            title: self.title,
            description: self.description,
            unit: self.unit,
            kit: self.kit,
            created,
        }
    }
}
