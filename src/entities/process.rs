//! STEP entity type - Process step definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record};
use crate::core::identity::{EntityId, EntityKind};

/// Template describing one ordered step of the manufacturing process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Unique identifier (STEP-xxx)
    pub id: EntityId,

    /// Step name
    pub name: String,

    /// What the operator does in this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Position in the process, unique across steps
    pub sequence: u32,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for ProcessStep {
    const KIND: EntityKind = EntityKind::ProcessStep;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{}. {}", self.sequence, self.name)
    }

    fn natural_key(&self) -> Option<(&'static str, String)> {
        Some(("sequence", self.sequence.to_string()))
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::ProcessStep(step) => Some(step),
            _ => None,
        }
    }
}

/// Fields for creating a [`ProcessStep`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewProcessStep {
    pub name: String,
    pub description: Option<String>,
    pub sequence: u32,
}

impl NewProcessStep {
    pub fn new(name: impl Into<String>, sequence: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Draft for NewProcessStep {
    type Entity = ProcessStep;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> ProcessStep {
        ProcessStep {
            id,
            name: self.name,
            description: self.description,
            sequence: self.sequence,
            created,
        }
    }
}
