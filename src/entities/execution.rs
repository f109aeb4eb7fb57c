//! EXEC entity type - Process step executions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::identity::{EntityId, EntityKind};

/// One concrete performance of a process step on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Unique identifier (EXEC-xxx)
    pub id: EntityId,

    /// Operator who performed the step
    pub operator: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Step definition performed (STEP-xxx)
    pub step: EntityId,

    pub unit: EntityId,

    pub kit: EntityId,

    /// Fixture used, if any (FIX-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<EntityId>,

    /// Episode the execution belongs to, if any (EPI-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<EntityId>,

    pub created: DateTime<Utc>,
}

impl Entity for Execution {
    const KIND: EntityKind = EntityKind::Execution;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        self.operator.clone()
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("step", EntityKind::ProcessStep, &self.step),
            Reference::new("unit", EntityKind::Unit, &self.unit),
            Reference::new("kit", EntityKind::Kit, &self.kit),
        ];
        if let Some(ref fixture) = self.fixture {
            refs.push(Reference::new("fixture", EntityKind::Fixture, fixture));
        }
        if let Some(ref episode) = self.episode {
            refs.push(Reference::new("episode", EntityKind::Episode, episode));
        }
        refs
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Execution(exec) => Some(exec),
            _ => None,
        }
    }
}

/// Fields for creating an [`Execution`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewExecution {
    pub operator: String,
    pub notes: Option<String>,
    pub step: EntityId,
    pub unit: EntityId,
    pub kit: EntityId,
    pub fixture: Option<EntityId>,
    pub episode: Option<EntityId>,
}

impl NewExecution {
    pub fn new(operator: impl Into<String>, step: &EntityId, unit: &EntityId, kit: &EntityId) -> Self {
        Self {
            operator: operator.into(),
            notes: None,
            step: step.clone(),
            unit: unit.clone(),
            kit: kit.clone(),
            fixture: None,
            episode: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_fixture(mut self, fixture: &EntityId) -> Self {
        self.fixture = Some(fixture.clone());
        self
    }

    pub fn with_episode(mut self, episode: &EntityId) -> Self {
        self.episode = Some(episode.clone());
        self
    }
}

impl Draft for NewExecution {
    type Entity = Execution;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Execution {
        Execution {
            id,
            operator: self.operator,
            notes: self.notes,
            step: self.step,
            unit: self.unit,
            kit: self.kit,
            fixture: self.fixture,
            episode: self.episode,
            created,
        }
    }
}
