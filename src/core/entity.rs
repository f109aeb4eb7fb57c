//! Entity trait and the closed set of record variants

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::error::TraceResult;
use crate::core::identity::{EntityId, EntityKind};
use crate::entities::{
    ComponentLot, Ctq, Episode, Execution, Fixture, Kit, Measurement, NewComponentLot, NewCtq,
    NewEpisode, NewExecution, NewFixture, NewKit, NewMeasurement, NewProcessStep, NewUnit,
    ProcessStep, Unit,
};

/// A "connect to existing record by id" link held by a dependent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Field on the dependent record holding the link
    pub field: &'static str,
    /// Kind the link must point at
    pub expected: EntityKind,
    /// Target id
    pub id: EntityId,
}

impl Reference {
    pub fn new(field: &'static str, expected: EntityKind, id: &EntityId) -> Self {
        Self {
            field,
            expected,
            id: id.clone(),
        }
    }
}

/// Common trait for all traceability entities
pub trait Entity: Clone + Serialize + DeserializeOwned + Into<Record> {
    /// The kind every instance of this type belongs to
    const KIND: EntityKind;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Short human-readable label
    fn label(&self) -> String;

    /// Natural key that must be unique within the kind, as (field, value)
    fn natural_key(&self) -> Option<(&'static str, String)> {
        None
    }

    /// Parent records this entity connects to
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Structural checks that need nothing beyond the record itself
    fn check(&self) -> TraceResult<()> {
        Ok(())
    }

    /// Extract this type from a record of the matching variant
    fn from_record(record: Record) -> Option<Self>;
}

/// Input fields for creating an entity; the store supplies id and timestamp
pub trait Draft {
    type Entity: Entity;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Self::Entity;
}

/// A stored record of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Unit(Unit),
    Kit(Kit),
    Fixture(Fixture),
    ComponentLot(ComponentLot),
    Episode(Episode),
    ProcessStep(ProcessStep),
    Ctq(Ctq),
    Execution(Execution),
    Measurement(Measurement),
}

macro_rules! each_record {
    ($record:expr, $e:ident => $body:expr) => {
        match $record {
            Record::Unit($e) => $body,
            Record::Kit($e) => $body,
            Record::Fixture($e) => $body,
            Record::ComponentLot($e) => $body,
            Record::Episode($e) => $body,
            Record::ProcessStep($e) => $body,
            Record::Ctq($e) => $body,
            Record::Execution($e) => $body,
            Record::Measurement($e) => $body,
        }
    };
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Unit(_) => EntityKind::Unit,
            Record::Kit(_) => EntityKind::Kit,
            Record::Fixture(_) => EntityKind::Fixture,
            Record::ComponentLot(_) => EntityKind::ComponentLot,
            Record::Episode(_) => EntityKind::Episode,
            Record::ProcessStep(_) => EntityKind::ProcessStep,
            Record::Ctq(_) => EntityKind::Ctq,
            Record::Execution(_) => EntityKind::Execution,
            Record::Measurement(_) => EntityKind::Measurement,
        }
    }

    pub fn id(&self) -> &EntityId {
        each_record!(self, e => e.id())
    }

    pub fn created(&self) -> DateTime<Utc> {
        each_record!(self, e => e.created())
    }

    pub fn label(&self) -> String {
        each_record!(self, e => e.label())
    }

    pub fn natural_key(&self) -> Option<(&'static str, String)> {
        each_record!(self, e => e.natural_key())
    }

    pub fn references(&self) -> Vec<Reference> {
        each_record!(self, e => e.references())
    }

    pub fn check(&self) -> TraceResult<()> {
        each_record!(self, e => e.check())
    }

    /// Convert into a concrete entity type, if the variant matches
    pub fn into_entity<T: Entity>(self) -> Option<T> {
        T::from_record(self)
    }
}

/// Untyped creation request, one variant per kind
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Unit(NewUnit),
    Kit(NewKit),
    Fixture(NewFixture),
    ComponentLot(NewComponentLot),
    Episode(NewEpisode),
    ProcessStep(NewProcessStep),
    Ctq(NewCtq),
    Execution(NewExecution),
    Measurement(NewMeasurement),
}

impl NewRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::Unit(_) => EntityKind::Unit,
            NewRecord::Kit(_) => EntityKind::Kit,
            NewRecord::Fixture(_) => EntityKind::Fixture,
            NewRecord::ComponentLot(_) => EntityKind::ComponentLot,
            NewRecord::Episode(_) => EntityKind::Episode,
            NewRecord::ProcessStep(_) => EntityKind::ProcessStep,
            NewRecord::Ctq(_) => EntityKind::Ctq,
            NewRecord::Execution(_) => EntityKind::Execution,
            NewRecord::Measurement(_) => EntityKind::Measurement,
        }
    }

    /// Materialize the record with the given id and timestamp
    pub fn build(self, id: EntityId, created: DateTime<Utc>) -> Record {
        match self {
            NewRecord::Unit(d) => d.build(id, created).into(),
            NewRecord::Kit(d) => d.build(id, created).into(),
            NewRecord::Fixture(d) => d.build(id, created).into(),
            NewRecord::ComponentLot(d) => d.build(id, created).into(),
            NewRecord::Episode(d) => d.build(id, created).into(),
            NewRecord::ProcessStep(d) => d.build(id, created).into(),
            NewRecord::Ctq(d) => d.build(id, created).into(),
            NewRecord::Execution(d) => d.build(id, created).into(),
            NewRecord::Measurement(d) => d.build(id, created).into(),
        }
    }
}

macro_rules! record_conversions {
    ($($variant:ident => $entity:ty, $draft:ty);* $(;)?) => {
        $(
            impl From<$entity> for Record {
                fn from(entity: $entity) -> Self {
                    Record::$variant(entity)
                }
            }

            impl From<$draft> for NewRecord {
                fn from(draft: $draft) -> Self {
                    NewRecord::$variant(draft)
                }
            }
        )*
    };
}

record_conversions! {
    Unit => Unit, NewUnit;
    Kit => Kit, NewKit;
    Fixture => Fixture, NewFixture;
    ComponentLot => ComponentLot, NewComponentLot;
    Episode => Episode, NewEpisode;
    ProcessStep => ProcessStep, NewProcessStep;
    Ctq => Ctq, NewCtq;
    Execution => Execution, NewExecution;
    Measurement => Measurement, NewMeasurement;
}
